//! Structured logging setup using the `tracing` ecosystem.
//!
//! Console output always goes to stderr so that `--format json` output on
//! stdout stays machine-readable. The log file is rotated daily.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::APP_NAME;
use crate::error::BbbResult;

/// Install the global subscriber: compact stderr output plus a daily log file
/// `bbb-meetings.log` in `log_dir`.
///
/// `level` is any `EnvFilter` directive ("debug", "bbb_api=trace,info", ...);
/// an unparsable one falls back to "info". With `json_output` the file gets
/// one JSON object per event.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> BbbResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, format!("{APP_NAME}.log"));
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let json_file = json_output.then(|| {
        fmt::layer()
            .with_writer(writer.clone())
            .json()
            .with_file(true)
            .with_line_number(true)
    });
    let text_file = (!json_output).then(|| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(filter(level))
        .with(console_layer())
        .with(json_file)
        .with(text_file)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?;

    tracing::debug!("logging to {} at {level}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Keeps the background log writer alive; dropping it flushes the file.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Console-only logging. A no-op if a subscriber is already installed.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(level))
        .with(console_layer())
        .try_init();
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer().with_writer(std::io::stderr).compact()
}
