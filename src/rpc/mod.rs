//! Ledger RPC access
//!
//! Fetches transaction envelopes and result metadata from a Horizon endpoint.

mod client;
pub mod mock;
mod network;

pub use client::{HorizonClient, RpcClient, RpcError, TransactionResponse};
pub use mock::MockRpcClient;
pub use network::{Network, NetworkParseError};
