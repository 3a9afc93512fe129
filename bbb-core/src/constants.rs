//! Application-wide constants.

/// Application name, also used for config and data directory names.
pub const APP_NAME: &str = "bbb-meetings";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path segment between the server URL and the call name.
pub const API_PATH: &str = "api";

/// Default BBB request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Public BigBlueButton test server. Not for production use.
pub const DEMO_SERVER_URL: &str = "https://test-install.blindsidenetworks.com/bigbluebutton";

/// Shared secret of the public test server.
pub const DEMO_SHARED_SECRET: &str = "8cd8ef52e8e101574e400365b55e11a6";

/// Default attendee password.
pub const DEFAULT_ATTENDEE_PASSWORD: &str = "attendee123";

/// Default moderator password.
pub const DEFAULT_MODERATOR_PASSWORD: &str = "moderator123";

/// Room type used when the requested one is unknown.
pub const DEFAULT_ROOM_TYPE: &str = "meeting";

/// BBB `returncode` values.
pub mod returncode {
    pub const SUCCESS: &str = "SUCCESS";
}

/// BBB API call names.
pub mod calls {
    pub const CREATE: &str = "create";
    pub const JOIN: &str = "join";
    pub const IS_MEETING_RUNNING: &str = "isMeetingRunning";
    pub const GET_MEETING_INFO: &str = "getMeetingInfo";
    pub const GET_MEETINGS: &str = "getMeetings";
    pub const END: &str = "end";
}

/// Environment variables that override configured server values.
pub mod env {
    pub const SERVER_URL: &str = "BBB_SERVER_URL";
    pub const SHARED_SECRET: &str = "BBB_SHARED_SECRET";
    pub const ATTENDEE_PASSWORD: &str = "BBB_DEFAULT_ATTENDEE_PW";
    pub const MODERATOR_PASSWORD: &str = "BBB_DEFAULT_MODERATOR_PW";
    pub const LOGOUT_URL: &str = "BBB_LOGOUT_URL";
}
