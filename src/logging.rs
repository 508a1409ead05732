//! Tracing setup for the server binary
//!
//! Logs go to stdout, as plain text or JSON lines. File logging adds a
//! daily rotating file written through a non-blocking worker; the returned
//! guard must be held for as long as logs should be flushed.

use anyhow::Result;
use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Prefix of the daily log files, which are suffixed with the date
pub const LOG_FILE_PREFIX: &str = "studyaid.log";

/// Builds the event filter
///
/// `debug` forces the `debug` level. Otherwise `RUST_LOG` is honoured and
/// the level falls back to `info`.
pub fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global tracing subscriber
///
/// ### Arguments
///
/// * `debug` - Log at debug level
/// * `json` - Format stdout logs as JSON lines
/// * `log_dir` - When set, also write daily rotating files in this directory
///
/// ### Returns
///
/// The file writer's guard when file logging is enabled
///
/// ### Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(debug: bool, json: bool, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if json {
        layers.push(fmt::layer().json().boxed());
    } else {
        layers.push(fmt::layer().with_target(false).boxed());
    }

    let guard = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_PREFIX));
            layers.push(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(debug))
        .try_init()?;

    if let Some(dir) = log_dir {
        tracing::info!("Logging to daily rotating files in {}", dir.display());
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_forces_debug_level() {
        let filter = env_filter(true);
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_init_creates_log_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        // Another test may already own the global subscriber
        let _ = init(false, false, Some(&log_dir));

        assert!(log_dir.is_dir());
    }
}
