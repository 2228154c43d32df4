//! Mock RPC client for deterministic testing
//!
//! Returns a pre-configured transaction (or failure) without touching the
//! network, and records every hash it was asked for.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::{RpcClient, RpcError, TransactionResponse};
use super::network::Network;

#[derive(Clone, Debug)]
enum MockReply {
    Transaction(TransactionResponse),
    NotFound,
}

#[derive(Clone, Debug)]
pub struct MockRpcClient {
    network: Network,
    reply: MockReply,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockRpcClient {
    /// Client that answers every request with the given transaction
    pub fn new(network: Network, transaction: TransactionResponse) -> Self {
        Self {
            network,
            reply: MockReply::Transaction(transaction),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Client that reports every transaction as missing
    pub fn not_found(network: Network) -> Self {
        Self {
            network,
            reply: MockReply::NotFound,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hashes requested so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RpcClient for MockRpcClient {
    fn network(&self) -> Network {
        self.network
    }

    async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionResponse, RpcError> {
        self.requests.lock().push(tx_hash.to_string());
        match &self.reply {
            MockReply::Transaction(tx) => Ok(tx.clone()),
            MockReply::NotFound => Err(RpcError::NotFound(tx_hash.to_string())),
        }
    }
}
