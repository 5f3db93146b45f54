//! Tracing subscriber setup.
//!
//! The configured level applies to this crate and to the HTTP trace layer;
//! everything else logs at `warn`. `RUST_LOG`, when set, replaces the
//! configured directives entirely.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::{BlogError, Result};

/// Map a configured level onto a filter directive; unknown names mean `info`.
fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" => "error",
        "off" => "off",
        _ => "info",
    }
}

/// Filter directives for the configured level.
fn default_directives(level: &str) -> String {
    let level = normalize_level(level);
    format!("warn,blog={level},tower_http={level},sqlx=warn")
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directives(level))
        .map_err(|e| BlogError::Config(format!("invalid log filter: {e}")))
}

/// Open the log file for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber: colored console output plus a plain-text
/// log file.
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level)?;
    let log_file = Arc::new(open_log_file(Path::new(&config.file))?);

    let console = fmt::layer().with_writer(std::io::stdout).with_target(true);
    let file = fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| BlogError::Config(format!("failed to install logger: {e}")))?;

    tracing::debug!(file = %config.file, "Logging initialized");
    Ok(())
}

/// Console-only logging, used when the log file is unavailable.
pub fn init_console_only(level: &str) {
    let filter = build_filter(level).unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed; keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout).with_target(true))
        .try_init();
}
