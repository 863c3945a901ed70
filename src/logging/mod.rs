//! Diagnostic logging.
//!
//! The terminal belongs to the chat view, so diagnostics only go to a file.
//! Without `[logging] file` no subscriber is installed and `tracing` macros
//! are no-ops.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;

use crate::config::model::LoggingConfig;

pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim())
        .map_err(|_| anyhow!("unknown log level {level:?} (expected trace, debug, info, warn or error)"))
}

pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = parse_level(&config.level)?;
    let Some(path) = &config.file else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(file = %path.display(), %level, "logging started");
    Ok(())
}
