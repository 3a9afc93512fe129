//! Init command - write the effective configuration to disk.

use std::path::{Path, PathBuf};

use console::style;

use bbb_core::config::AppConfig;
use bbb_core::error::{BbbError, BbbResult};
use crate::OutputFormat;

pub fn run(
    config: &AppConfig,
    path: Option<&Path>,
    force: bool,
    format: OutputFormat,
) -> BbbResult<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => AppConfig::default_config_path()?,
    };
    write_config(config, &path, force)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({
                "success": true,
                "path": path.display().to_string(),
            }));
        }
        OutputFormat::Text => {
            println!(
                "  {} Wrote configuration to {}",
                style("OK").green().bold(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Save `config` to `path`, refusing to replace an existing file unless `force`.
fn write_config(config: &AppConfig, path: &Path, force: bool) -> BbbResult<PathBuf> {
    if path.exists() && !force {
        return Err(BbbError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    config.save_to_file(path)?;
    Ok(path.to_path_buf())
}
