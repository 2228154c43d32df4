//! Transaction simulation
//!
//! The simulator is an external binary (`erst-sim`) that replays a transaction
//! envelope against its recorded result metadata. Requests and responses are
//! exchanged as JSON over stdin/stdout.

pub mod mock;
mod runner;
mod types;

pub use mock::{MockRunError, MockSimulatorRunner};
pub use runner::{ProcessRunner, SimulatorError, SimulatorRunner};
pub use types::{SimulationRequest, SimulationResponse};
