//! Debug workflow: fetch, simulate, record
//!
//! Fetch and simulation failures abort the run. History is best-effort: a
//! store that failed to open, or a save that fails, is reported in the
//! [`DebugReport`] and logged, but the simulation result is always returned.

use chrono::Utc;
use thiserror::Error;

use crate::data::{Session, SessionStore, StoreError};
use crate::rpc::{Network, RpcClient, RpcError, TransactionResponse};
use crate::simulator::{SimulationRequest, SimulationResponse, SimulatorError, SimulatorRunner};

/// Parameters of a single debug run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    pub tx_hash: String,
    pub network: Network,
    /// Custom RPC endpoint replacing the network default
    pub rpc_url: Option<String>,
    /// Request a flamegraph from the simulator
    pub profile: bool,
}

impl DebugConfig {
    /// `tx_hash` is stored trimmed of surrounding whitespace
    pub fn new(tx_hash: impl AsRef<str>, network: Network) -> Self {
        Self {
            tx_hash: tx_hash.as_ref().trim().to_string(),
            network,
            rpc_url: None,
            profile: false,
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: Option<String>) -> Self {
        self.rpc_url = rpc_url.filter(|url| !url.is_empty());
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }
}

#[derive(Error, Debug)]
pub enum DebugError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("failed to fetch transaction: {0}")]
    Fetch(#[from] RpcError),
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulatorError),
}

/// What happened to the history entry of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// Session stored under this row id
    Saved(i64),
    /// The store could not be opened
    Unavailable(String),
    /// The store was open but the save failed
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DebugReport {
    pub tx_hash: String,
    pub network: Network,
    pub envelope_size: usize,
    pub response: SimulationResponse,
    pub history: HistoryOutcome,
}

pub struct Debugger<R, S> {
    rpc: R,
    simulator: S,
    store: Result<SessionStore, StoreError>,
}

impl<R: RpcClient, S: SimulatorRunner> Debugger<R, S> {
    /// `store` is the result of opening the session database; an error only
    /// disables history recording
    pub fn new(rpc: R, simulator: S, store: Result<SessionStore, StoreError>) -> Self {
        if let Err(e) = &store {
            tracing::warn!(error = %e, "Session history disabled");
        }
        Self {
            rpc,
            simulator,
            store,
        }
    }

    pub async fn run(&self, config: &DebugConfig) -> Result<DebugReport, DebugError> {
        let tx = self.fetch(config).await?;
        self.replay(config, tx).await
    }

    /// Validate `config` and fetch the transaction it names
    pub async fn fetch(&self, config: &DebugConfig) -> Result<TransactionResponse, DebugError> {
        let tx_hash = config.tx_hash.as_str();
        if tx_hash.is_empty() {
            return Err(DebugError::Validation(
                "transaction hash must not be empty".into(),
            ));
        }
        if self.rpc.network() != config.network {
            return Err(DebugError::Validation(format!(
                "RPC client targets {} but {} was requested",
                self.rpc.network(),
                config.network
            )));
        }

        tracing::info!(tx_hash, network = %config.network, "Debugging transaction");

        Ok(self.rpc.get_transaction(tx_hash).await?)
    }

    /// Simulate a transaction returned by [`Debugger::fetch`] and record the
    /// outcome
    pub async fn replay(
        &self,
        config: &DebugConfig,
        tx: TransactionResponse,
    ) -> Result<DebugReport, DebugError> {
        let tx_hash = config.tx_hash.as_str();
        let envelope_size = tx.envelope_xdr.len();

        let request = SimulationRequest {
            envelope_xdr: tx.envelope_xdr,
            result_meta_xdr: tx.result_meta_xdr,
            profile: config.profile,
        };
        let response = self.simulator.run(&request).await?;
        tracing::info!(tx_hash, status = %response.status, "Simulation completed");

        let history = self.record(tx_hash, config.network, &response);

        Ok(DebugReport {
            tx_hash: tx_hash.to_string(),
            network: config.network,
            envelope_size,
            response,
            history,
        })
    }

    fn record(
        &self,
        tx_hash: &str,
        network: Network,
        response: &SimulationResponse,
    ) -> HistoryOutcome {
        let store = match &self.store {
            Ok(store) => store,
            Err(e) => return HistoryOutcome::Unavailable(e.to_string()),
        };

        let session = Session::from_simulation(tx_hash, network, Utc::now(), response);
        match store.save_session(&session) {
            Ok(id) => HistoryOutcome::Saved(id),
            Err(e) => {
                tracing::warn!(tx_hash, error = %e, "Failed to save session");
                HistoryOutcome::Failed(e.to_string())
            }
        }
    }
}
