//! Path utilities for erst data directories
//!
//! Every path is derived from an explicit data directory so callers (and
//! tests) can point the whole tool at a scratch location.

use std::path::{Path, PathBuf};

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "ERST_HOME";

/// Resolve the data directory: explicit path, then `ERST_HOME`, then ~/.erst
pub fn resolve_data_dir(custom_path: Option<PathBuf>) -> PathBuf {
    custom_path
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(default_data_dir)
}

/// Get the default data directory path (~/.erst)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".erst"))
        .unwrap_or_else(|| PathBuf::from(".erst"))
}

/// Get the session database path (<data_dir>/sessions.db)
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("sessions.db")
}

/// Get the logs directory (<data_dir>/logs)
pub fn logs_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Get the log file path (<data_dir>/logs/erst.log)
pub fn log_file_path(data_dir: &Path) -> PathBuf {
    logs_dir(data_dir).join("erst.log")
}

/// Get the config file path (<data_dir>/config.toml)
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}
