//! Error types for the BigBlueButton meeting crates.
//!
//! Every failure a caller can observe is one `BbbError` variant, with
//! conversions from the underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using BbbError.
pub type BbbResult<T> = Result<T, BbbError>;

/// Unified error type for client and orchestration failures.
#[derive(Error, Debug)]
pub enum BbbError {
    // -- Caller input --
    /// A required caller-supplied field is missing or empty.
    /// Raised before any network call is made.
    #[error("validation error: {0}")]
    Validation(String),

    // -- Configuration --
    /// Server URL or shared secret missing, or a config file is unreadable.
    #[error("configuration error: {0}")]
    Config(String),

    // -- Upstream --
    /// BBB answered, but with a returncode other than SUCCESS.
    #[error("remote error: {message}")]
    Remote {
        /// BBB's `<messageKey>`, when one was sent.
        key: Option<String>,
        /// BBB's `<message>` text, verbatim.
        message: String,
    },

    /// The BBB server could not be reached or answered with a bad HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request to the BBB server timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// A numeric field was present in the reply but not an integer.
    #[error("parse error: field <{field}> has non-integer value {value:?}")]
    Parse {
        /// Tag name of the offending element.
        field: String,
        /// The raw text found inside the element.
        value: String,
    },

    /// The meeting is absent or stopped and the caller may not start it.
    #[error("not found: {0}")]
    NotFound(String),

    // -- Local --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON or TOML (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BbbError {
    /// Build a remote error from a reply's message, falling back to a generic text.
    pub fn remote(key: Option<String>, message: Option<String>, fallback: &str) -> Self {
        BbbError::Remote {
            key,
            message: message.unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Whether the error came from failing to reach BBB at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, BbbError::Transport(_) | BbbError::Timeout(_))
    }
}

impl From<serde_json::Error> for BbbError {
    fn from(e: serde_json::Error) -> Self {
        BbbError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for BbbError {
    fn from(e: toml::de::Error) -> Self {
        BbbError::Config(e.to_string())
    }
}
