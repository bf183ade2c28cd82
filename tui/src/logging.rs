//! File logging for TUI mode; anything written to stderr would land on the alternate screen.

use anyhow::Result;
use std::{fs::OpenOptions, path::{Path, PathBuf}, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// Overrides where the TUI writes its log
pub const LOG_FILE_VAR: &str = "QUICKASK_LOG_FILE";

/// `$QUICKASK_LOG_FILE`, or `quickask.log` in the temp directory
pub fn log_path() -> PathBuf {
    std::env::var_os(LOG_FILE_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("quickask.log"))
}

/// Subscriber appending plain-text lines to `path`
pub fn file_subscriber(path: &Path, filter: EnvFilter) -> Result<impl tracing::Subscriber + Send + Sync> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish())
}

/// Install the file subscriber globally and return the path it writes to
pub fn init_file_logging() -> Result<PathBuf> {
    let path = log_path();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(file_subscriber(&path, filter)?)?;
    Ok(path)
}
