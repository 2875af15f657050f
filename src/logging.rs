//! File logging; the terminal belongs to ratatui.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::LogInitError;

pub const LOG_FILE_PREFIX: &str = "localweather.log";

const DEFAULT_FILTER: &str = "info,localweather=debug";

/// Open the daily log file under `log_dir`, creating the directory if needed.
pub fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, LogInitError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LogInitError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
        .map_err(|source| LogInitError::Appender {
            path: PathBuf::from(log_dir),
            source,
        })
}

/// Install the global subscriber. The returned guard flushes on drop and
/// must be held for the app lifetime.
pub fn init(log_dir: &Path) -> Result<WorkerGuard, LogInitError> {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()?;

    Ok(guard)
}
