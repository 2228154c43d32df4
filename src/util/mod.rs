//! Utility modules

pub mod paths;
pub mod tools;

pub use paths::{config_path, database_path, log_file_path, logs_dir, resolve_data_dir};
pub use tools::{locate_simulator, ToolStatus};
