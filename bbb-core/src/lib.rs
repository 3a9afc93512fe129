//! BBB Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other meeting crates:
//! - Server and room-type configuration (URL, shared secret, passwords, profiles)
//! - A single error enum covering validation, config, remote, and transport failures
//! - Structured logging with tracing
//! - Config and log directory lookup, plus common constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, RoomProfile, ServerConfig};
pub use error::{BbbError, BbbResult};
pub use logging::init_logging;
