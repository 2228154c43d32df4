pub mod cli;
pub mod config;
pub mod data;
pub mod debugger;
pub mod rpc;
pub mod simulator;
pub mod util;

pub use config::Config;
pub use data::{Database, SearchFilters, Session, SessionStore, StoreError, StoreErrorKind};
pub use debugger::{DebugConfig, DebugError, DebugReport, Debugger, HistoryOutcome};
pub use rpc::{HorizonClient, Network, RpcClient, RpcError};
pub use simulator::{ProcessRunner, SimulationRequest, SimulationResponse, SimulatorRunner};
