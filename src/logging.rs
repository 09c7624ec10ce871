//! Logging configuration using tracing
//!
//! The terminal belongs to the UI, so logs only ever go to a file.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};

pub const LOG_ENV: &str = "KEGEL_LOG";
const LOG_FILE: &str = "kegel.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/state/kegel/logs/` (or the platform data
/// dir when `HOME` is unset). Level is controlled by `KEGEL_LOG`.
///
/// ```bash
/// KEGEL_LOG=debug kegel
/// ```
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("kegel=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "kegel starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(log_dir)
}

fn log_directory() -> PathBuf {
    AppDirs::log_dir().unwrap_or_else(|| PathBuf::from("."))
}
