//! Per-user directories for config and log files.

use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::error::{BbbError, BbbResult};

/// `<os config dir>/bbb-meetings`, e.g. `~/.config/bbb-meetings` on Linux.
pub fn config_dir() -> BbbResult<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// `<os data dir>/bbb-meetings`, e.g. `~/.local/share/bbb-meetings` on Linux.
pub fn data_dir() -> BbbResult<PathBuf> {
    app_dir(dirs::data_dir(), "data")
}

fn app_dir(base: Option<PathBuf>, kind: &str) -> BbbResult<PathBuf> {
    base.map(|b| b.join(APP_NAME))
        .ok_or_else(|| BbbError::Config(format!("could not determine {kind} directory")))
}
