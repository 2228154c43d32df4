//! Mock simulator runner for deterministic testing
//!
//! Implements SimulatorRunner to return a pre-configured response without
//! spawning the simulator binary. Use this for orchestrator tests.
//!
//! # Example
//! ```no_run
//! use erst::simulator::{MockSimulatorRunner, SimulationResponse};
//!
//! let runner = MockSimulatorRunner::new(SimulationResponse {
//!     status: "success".into(),
//!     ..Default::default()
//! });
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::runner::{SimulatorError, SimulatorRunner};
use super::types::{SimulationRequest, SimulationResponse};

/// Type of error to simulate on run
#[derive(Clone, Debug)]
pub enum MockRunError {
    BinaryNotFound,
    Exited { code: i32, stderr: String },
}

impl MockRunError {
    fn into_simulator_error(self) -> SimulatorError {
        match self {
            MockRunError::BinaryNotFound => SimulatorError::BinaryNotFound("erst-sim".into()),
            MockRunError::Exited { code, stderr } => SimulatorError::Exited {
                code: Some(code),
                stderr,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockSimulatorRunner {
    outcome: Result<SimulationResponse, MockRunError>,
    requests: Arc<Mutex<Vec<SimulationRequest>>>,
}

impl MockSimulatorRunner {
    pub fn new(response: SimulationResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: MockRunError) -> Self {
        Self {
            outcome: Err(error),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<SimulationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl SimulatorRunner for MockSimulatorRunner {
    async fn run(&self, request: &SimulationRequest) -> Result<SimulationResponse, SimulatorError> {
        self.requests.lock().push(request.clone());
        self.outcome
            .clone()
            .map_err(MockRunError::into_simulator_error)
    }
}
