//! External tool lookup
//!
//! The simulator ships as a separate binary. A configured path must point to
//! an executable; otherwise the binary is searched for in `PATH`.

use std::path::{Path, PathBuf};

/// Binary name of the transaction simulator
pub const SIMULATOR_BINARY: &str = "erst-sim";

/// Environment variable pointing at the simulator binary
pub const SIMULATOR_PATH_ENV: &str = "ERST_SIMULATOR_PATH";

/// Status of a tool's availability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Tool is available at the given path
    Available(PathBuf),
    /// Tool was not found in PATH or configured location
    NotFound,
    /// A path was configured but it's invalid
    ConfiguredPathInvalid(PathBuf),
}

/// Locate the simulator binary
pub fn locate_simulator(configured_path: Option<&Path>) -> ToolStatus {
    if let Some(path) = configured_path {
        if is_valid_executable(path) {
            return ToolStatus::Available(path.to_path_buf());
        }
        return ToolStatus::ConfiguredPathInvalid(path.to_path_buf());
    }

    match which::which(SIMULATOR_BINARY) {
        Ok(path) => ToolStatus::Available(path),
        Err(_) => ToolStatus::NotFound,
    }
}

/// Check if a path points to a valid executable
fn is_valid_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        true
    }
}
