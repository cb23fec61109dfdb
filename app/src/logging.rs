// In app/src/logging.rs

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::{EnvFilter, Targets};
use tracing_subscriber::prelude::*;

/// Installs the process-wide subscriber. Call once, at startup.
///
/// Two sinks:
/// - `log_file`, opened in append mode, gets every DEBUG+ event from this
///   workspace with timestamps and no colour codes.
/// - stderr gets events at `log_level`, or whatever `RUST_LOG` says.
pub fn init(log_level: &str, log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(
            Targets::new()
                .with_target("hyper", LevelFilter::WARN)
                .with_target("hyper_util", LevelFilter::WARN)
                .with_target("reqwest", LevelFilter::WARN)
                .with_default(LevelFilter::DEBUG),
        );

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Logging was already initialized")?;
    Ok(())
}
