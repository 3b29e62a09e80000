//! Logging configuration using tracing

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "HEARTH_LOG";

/// File name prefix of the daily rolling log
pub const LOG_FILE_NAME: &str = "hearth.log";

const DEFAULT_FILTER: &str = "hearth_store=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `log_dir`, or to `~/.local/share/hearth/logs/` when
/// `None`. The filter is read from `HEARTH_LOG`.
///
/// # Examples
/// ```bash
/// HEARTH_LOG=debug cargo test
/// HEARTH_LOG=hearth_store=trace cargo test
/// ```
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => get_log_directory(),
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::config(format!("logging already initialized: {}", e)))?;

    tracing::info!("Hearth store logging started in {}", log_dir.display());

    Ok(())
}

/// Build the filter from `HEARTH_LOG`, falling back to the default
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Get the default log directory path
pub fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("hearth").join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_directory_ends_with_hearth_logs() {
        let dir = get_log_directory();
        assert!(dir.ends_with("hearth/logs"));
    }

    #[test]
    fn test_init_creates_directory_and_rejects_second_call() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");

        init(Some(&dir)).unwrap();
        assert!(dir.is_dir());

        let err = init(Some(&dir)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
