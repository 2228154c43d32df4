use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::types::{SimulationRequest, SimulationResponse};
use crate::util::tools::{locate_simulator, ToolStatus, SIMULATOR_BINARY};

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("simulator binary `{0}` not found (set ERST_SIMULATOR_PATH or [simulator] path)")]
    BinaryNotFound(String),
    #[error("configured simulator path is not executable: {}", .0.display())]
    InvalidBinary(PathBuf),
    #[error("failed to spawn simulator {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("simulator I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode simulation request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("simulator exited with {}: {stderr}", exit_label(.code))]
    Exited { code: Option<i32>, stderr: String },
    #[error("failed to decode simulator output: {0}")]
    Decode(#[source] serde_json::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

/// Executes a transaction replay
#[async_trait]
pub trait SimulatorRunner: Send + Sync {
    async fn run(&self, request: &SimulationRequest) -> Result<SimulationResponse, SimulatorError>;
}

/// Runs the simulator as a child process, one process per request
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: PathBuf,
}

impl ProcessRunner {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Resolve the simulator binary from an explicit path or `PATH`
    pub fn discover(configured: Option<&Path>) -> Result<Self, SimulatorError> {
        match locate_simulator(configured) {
            ToolStatus::Available(path) => Ok(Self::new(path)),
            ToolStatus::ConfiguredPathInvalid(path) => Err(SimulatorError::InvalidBinary(path)),
            ToolStatus::NotFound => Err(SimulatorError::BinaryNotFound(
                SIMULATOR_BINARY.to_string(),
            )),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl SimulatorRunner for ProcessRunner {
    async fn run(&self, request: &SimulationRequest) -> Result<SimulationResponse, SimulatorError> {
        let payload = serde_json::to_vec(request).map_err(SimulatorError::Encode)?;

        let mut child = Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SimulatorError::Spawn {
                path: self.binary.clone(),
                source,
            })?;

        // Feed stdin while stdout and stderr are drained, so neither side
        // blocks on a full pipe
        let writer = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                stdin.write_all(&payload).await?;
                stdin.shutdown().await
            })
        });

        let output = child.wait_with_output().await?;
        let written = match writer {
            Some(handle) => handle.await.unwrap_or_else(|e| Err(e.into())),
            None => Ok(()),
        };

        // A simulator may exit before reading its input; the exit status
        // takes precedence over a failed stdin write
        if !output.status.success() {
            return Err(SimulatorError::Exited {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match written {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!("Simulator closed stdin before reading the whole request");
            }
            Err(e) => return Err(SimulatorError::Io(e)),
            Ok(()) => {}
        }

        let response: SimulationResponse =
            serde_json::from_slice(&output.stdout).map_err(SimulatorError::Decode)?;
        tracing::debug!(
            status = %response.status,
            events = response.events.len(),
            logs = response.logs.len(),
            "Simulation finished"
        );
        Ok(response)
    }
}
