//! Session record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rpc::Network;
use crate::simulator::SimulationResponse;

/// One recorded simulation attempt
///
/// Fields are fixed at construction; the store never updates a saved record.
/// `events` and `logs` hold the simulator output serialized as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    tx_hash: String,
    network: Network,
    timestamp: DateTime<Utc>,
    error: String,
    events: String,
    logs: String,
}

impl Session {
    /// Build a record from already-serialized payloads
    pub fn new(
        tx_hash: impl Into<String>,
        network: Network,
        timestamp: DateTime<Utc>,
        error: impl Into<String>,
        events: impl Into<String>,
        logs: impl Into<String>,
    ) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            network,
            timestamp,
            error: error.into(),
            events: events.into(),
            logs: logs.into(),
        }
    }

    /// Build a record from a finished simulation
    pub fn from_simulation(
        tx_hash: impl Into<String>,
        network: Network,
        timestamp: DateTime<Utc>,
        response: &SimulationResponse,
    ) -> Self {
        Self::new(
            tx_hash,
            network,
            timestamp,
            response.error.clone(),
            serialize_payload("events", &response.events),
            serialize_payload("logs", &response.logs),
        )
    }

    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Simulation error; empty on success
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Serialized diagnostic events, exactly as stored
    pub fn events(&self) -> &str {
        &self.events
    }

    /// Serialized log lines, exactly as stored
    pub fn logs(&self) -> &str {
        &self.logs
    }

    /// Parse the stored events payload
    pub fn decoded_events(&self) -> serde_json::Result<Vec<Value>> {
        serde_json::from_str(&self.events)
    }

    /// Parse the stored logs payload
    pub fn decoded_logs(&self) -> serde_json::Result<Vec<String>> {
        serde_json::from_str(&self.logs)
    }
}

fn serialize_payload<T: Serialize>(field: &'static str, value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::warn!(field, error = %e, "Failed to serialize simulator payload");
        "[]".to_string()
    })
}
