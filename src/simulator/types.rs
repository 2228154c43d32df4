use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input handed to the simulator binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub envelope_xdr: String,
    pub result_meta_xdr: String,
    /// Ask the simulator to produce a flamegraph of host execution
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub profile: bool,
}

/// Outcome reported by the simulator binary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub status: String,
    /// Empty when the replayed transaction succeeded
    #[serde(default)]
    pub error: String,
    /// Diagnostic events in emission order
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(default)]
    pub logs: Vec<String>,
    /// SVG flamegraph, present only for profiled requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flamegraph: Option<String>,
}
