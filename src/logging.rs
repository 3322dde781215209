//! File logging for booksearch
//!
//! Both front ends draw on the terminal or own the window, so diagnostics
//! never go to stdout/stderr. Everything is written to a log file that is
//! truncated at start-up, next to the executable unless a path is given.

use crate::error::{BookSearchError, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default filter when none is given on the command line
pub const DEFAULT_LEVEL: &str = "info";

const LOG_FILE_NAME: &str = "booksearch.log";

/// Logging options taken from the command line
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `booksearch=debug`
    pub level: String,
    /// Log file; defaults to [`default_log_path`]
    pub path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            path: None,
        }
    }
}

/// Keeps the background writer alive. Dropping it flushes pending lines.
pub struct LogGuard {
    _worker: WorkerGuard,
    path: PathBuf,
}

impl LogGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Get the log file path (same directory as executable)
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| BookSearchError::Logging(format!("invalid log level '{}': {}", level, e)))
}

/// Initialize the global subscriber. Call once, at start-up.
pub fn init(config: &LogConfig) -> Result<LogGuard> {
    let filter = build_filter(&config.level)?;
    let path = config.path.clone().unwrap_or_else(default_log_path);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(&path)
        .map_err(|e| BookSearchError::Logging(format!("{}: {}", path.display(), e)))?;

    let (writer, worker) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| BookSearchError::Logging(e.to_string()))?;

    Ok(LogGuard {
        _worker: worker,
        path,
    })
}
