//! Tracing subscriber setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it logs to a file
//! when one is configured and stays silent otherwise.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::AppError;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "jobmarket_dash=warn";

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(target: LogTarget<'_>) -> Result<(), AppError> {
    let registry = tracing_subscriber::registry().with(env_filter());

    match target {
        LogTarget::Stderr => {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;
            let _ = registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init();
        }
        LogTarget::Off => {}
    }

    Ok(())
}
