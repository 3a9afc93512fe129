//! BBB API - HTTP client for the BigBlueButton conferencing API.
//!
//! Every BigBlueButton call is a GET of the form
//! `<server>/api/<call>?<query>&checksum=<sha1(call + query + secret)>`
//! answered with a small XML document. This crate signs those URLs, issues
//! the calls, and reads the replies into typed results:
//! - `create`, `isMeetingRunning`, `getMeetingInfo`, `getMeetings`, `end`
//! - signed `join` URLs (built locally, never fetched)

pub mod client;
pub mod endpoints;
pub mod response;

// Re-export key types
pub use client::{checksum, ApiClient};
pub use endpoints::meetings::{CreateMeetingOptions, EndResult, MeetingList, RunningStatus};
pub use response::{BbbResponse, MeetingStatus};
pub use reqwest::Url;
