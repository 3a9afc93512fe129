//! Application configuration management.
//!
//! Handles loading and accessing the BigBlueButton server connection, the
//! default meeting passwords, and the room-type profiles. Configuration is
//! read from TOML on disk, then overridden from the environment. The result
//! is an immutable value handed to the client and service constructors.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{BbbError, BbbResult};
use crate::platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// BBB server connection and default passwords.
    #[serde(default)]
    pub server: ServerConfig,

    /// Settings for meetings auto-created when a moderator joins.
    #[serde(default)]
    pub defaults: MeetingDefaults,

    /// Room-type profiles keyed by room type (e.g. "classroom").
    #[serde(default = "default_room_types")]
    pub room_types: BTreeMap<String, RoomProfile>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// BBB server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the BBB installation, without the trailing `/api`.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Shared secret used to compute request checksums.
    #[serde(default = "default_shared_secret")]
    pub shared_secret: String,

    /// Password that joins a meeting as attendee.
    #[serde(default = "default_attendee_password")]
    pub attendee_password: String,

    /// Password that joins a meeting as moderator.
    #[serde(default = "default_moderator_password")]
    pub moderator_password: String,

    /// Where BBB sends users after they leave. Empty means BBB's default.
    #[serde(default)]
    pub logout_url: String,

    /// Request timeout in milliseconds. 0 disables the timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

/// A named bundle of meeting defaults selected by room type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomProfile {
    /// Human-readable name (e.g. "Virtual Classroom").
    pub display_name: String,
    /// Short description, appended to the welcome text.
    #[serde(default)]
    pub description: String,
    /// Maximum number of participants. 0 means unlimited.
    #[serde(default)]
    pub max_participants: u32,
    /// Whether the meeting may be recorded.
    #[serde(default)]
    pub record: bool,
    /// Meeting duration in minutes. 0 means unlimited.
    #[serde(default)]
    pub duration_minutes: u32,
}

/// Settings for meetings created implicitly by a moderator join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDefaults {
    #[serde(default)]
    pub record: bool,
    #[serde(default = "default_max_participants")]
    pub max_participants: u32,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_server_url() -> String {
    constants::DEMO_SERVER_URL.to_string()
}

fn default_shared_secret() -> String {
    constants::DEMO_SHARED_SECRET.to_string()
}

fn default_attendee_password() -> String {
    constants::DEFAULT_ATTENDEE_PASSWORD.to_string()
}

fn default_moderator_password() -> String {
    constants::DEFAULT_MODERATOR_PASSWORD.to_string()
}

fn default_request_timeout() -> u64 {
    constants::DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_max_participants() -> u32 {
    50
}

fn default_duration() -> u32 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_room_types() -> BTreeMap<String, RoomProfile> {
    let mut rooms = BTreeMap::new();
    rooms.insert(
        "classroom".to_string(),
        RoomProfile {
            display_name: "Virtual Classroom".into(),
            description: "Interactive learning environment".into(),
            max_participants: 30,
            record: true,
            duration_minutes: 90,
        },
    );
    rooms.insert(constants::DEFAULT_ROOM_TYPE.to_string(), RoomProfile::team_meeting());
    rooms.insert(
        "webinar".to_string(),
        RoomProfile {
            display_name: "Webinar".into(),
            description: "Large audience presentation".into(),
            max_participants: 100,
            record: true,
            duration_minutes: 120,
        },
    );
    rooms
}

impl RoomProfile {
    /// The built-in `meeting` profile.
    pub fn team_meeting() -> Self {
        Self {
            display_name: "Team Meeting".into(),
            description: "Collaborative workspace".into(),
            max_participants: 20,
            record: false,
            duration_minutes: 60,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            defaults: MeetingDefaults::default(),
            room_types: default_room_types(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            shared_secret: default_shared_secret(),
            attendee_password: default_attendee_password(),
            moderator_password: default_moderator_password(),
            logout_url: String::new(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl Default for MeetingDefaults {
    fn default() -> Self {
        Self {
            record: false,
            max_participants: default_max_participants(),
            duration_minutes: default_duration(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ServerConfig {
    /// Fail with a config error if the URL or shared secret is empty.
    pub fn validate(&self) -> BbbResult<()> {
        if self.server_url.trim().is_empty() {
            return Err(BbbError::Config("server URL is not set".into()));
        }
        if self.shared_secret.is_empty() {
            return Err(BbbError::Config("shared secret is not set".into()));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration the way the CLI does: optional file, then environment.
    ///
    /// With no explicit path, the default config path is used if it exists,
    /// otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> BbbResult<Self> {
        let mut config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> BbbResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BbbError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config: AppConfig = toml::from_str(&contents)?;
        config.server.server_url = Self::sanitize_server_url(&config.server.server_url);
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> BbbResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| BbbError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> BbbResult<PathBuf> {
        Ok(platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> BbbResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Override server values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override server values from any variable source. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(constants::env::SERVER_URL) {
            self.server.server_url = Self::sanitize_server_url(&url);
        }
        if let Some(secret) = get(constants::env::SHARED_SECRET) {
            self.server.shared_secret = secret;
        }
        if let Some(pw) = get(constants::env::ATTENDEE_PASSWORD) {
            self.server.attendee_password = pw;
        }
        if let Some(pw) = get(constants::env::MODERATOR_PASSWORD) {
            self.server.moderator_password = pw;
        }
        if let Some(url) = get(constants::env::LOGOUT_URL) {
            self.server.logout_url = url;
        }
    }

    /// Resolve a room type to its profile.
    ///
    /// Unknown or absent keys fall back to the `meeting` profile; if that one
    /// was removed from the table, the built-in team meeting profile is used.
    pub fn room_profile(&self, room_type: Option<&str>) -> RoomProfile {
        room_type
            .and_then(|key| self.room_types.get(key))
            .or_else(|| self.room_types.get(constants::DEFAULT_ROOM_TYPE))
            .cloned()
            .unwrap_or_else(RoomProfile::team_meeting)
    }

    /// Normalize a server URL: trim whitespace and quotes, drop trailing slashes.
    pub fn sanitize_server_url(url: &str) -> String {
        url.trim()
            .trim_matches('"')
            .trim()
            .trim_end_matches('/')
            .to_string()
    }
}
