//! File logging.
//!
//! The terminal owns stdout, so everything goes to `civic/tui.log` under the XDG state
//! directory (`~/.local/state` when unset). The filter comes from `--log` / `CIVIC_LOG`.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Lifecycle and failures from this crate, quiet HTTP internals.
pub const DEFAULT_FILTER: &str = "civic_tui=info,reqwest=warn";

const APP_DIR: &str = "civic";
const LOG_FILE: &str = "tui.log";

/// Install the file subscriber. Keep the returned guard alive until exit or buffered
/// lines are lost.
pub fn init(filter: &str) -> Result<WorkerGuard> {
    let log_file = log_file_path().ok_or_else(|| anyhow!("Could not determine state directory"))?;
    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let (env_filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(e)),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(env_filter)
        .init();

    if let Some(e) = rejected {
        tracing::warn!(%e, filter, "Invalid log filter, using {}", DEFAULT_FILTER);
    }
    tracing::info!(path = %log_file.display(), "Logging started");

    Ok(guard)
}

/// Where the log is written, if a state or home directory can be found.
pub fn log_file_path() -> Option<PathBuf> {
    log_dir(dirs::state_dir(), dirs::home_dir()).map(|dir| dir.join(LOG_FILE))
}

fn log_dir(state: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    state
        .or_else(|| home.map(|h| h.join(".local").join("state")))
        .map(|dir| dir.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_prefers_state_dir() {
        assert_eq!(
            log_dir(Some(PathBuf::from("/state")), Some(PathBuf::from("/home/u"))),
            Some(PathBuf::from("/state/civic"))
        );
    }

    #[test]
    fn test_log_dir_falls_back_to_home() {
        assert_eq!(
            log_dir(None, Some(PathBuf::from("/home/u"))),
            Some(PathBuf::from("/home/u/.local/state/civic"))
        );
        assert_eq!(log_dir(None, None), None);
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
