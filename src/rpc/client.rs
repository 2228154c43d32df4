use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::network::Network;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("transaction {0} not found")]
    NotFound(String),
    #[error("RPC request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("RPC returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("RPC response for {tx_hash} is missing {field}")]
    MissingField {
        tx_hash: String,
        field: &'static str,
    },
}

/// Raw XDR payloads of a confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResponse {
    pub envelope_xdr: String,
    pub result_xdr: String,
    pub result_meta_xdr: String,
}

/// Source of transaction envelopes for the debugger
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Network this client talks to
    fn network(&self) -> Network;

    /// Fetch the envelope and result metadata of a transaction by hash
    async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionResponse, RpcError>;
}

#[derive(Debug, Deserialize)]
struct HorizonTransaction {
    #[serde(default)]
    envelope_xdr: Option<String>,
    #[serde(default)]
    result_xdr: Option<String>,
    #[serde(default)]
    result_meta_xdr: Option<String>,
}

/// Horizon REST client
#[derive(Debug, Clone)]
pub struct HorizonClient {
    base_url: String,
    network: Network,
    client: Client,
}

impl HorizonClient {
    /// Client for a custom Horizon endpoint
    pub fn with_url(
        base_url: impl Into<String>,
        network: Network,
        timeout: Duration,
    ) -> Result<Self, RpcError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            network,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transaction_url(&self, tx_hash: &str) -> String {
        format!("{}/transactions/{}", self.base_url, tx_hash)
    }
}

#[async_trait]
impl RpcClient for HorizonClient {
    fn network(&self) -> Network {
        self.network
    }

    async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionResponse, RpcError> {
        let url = self.transaction_url(tx_hash);
        tracing::debug!(url = %url, network = %self.network, "Fetching transaction");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RpcError::NotFound(tx_hash.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let tx: HorizonTransaction = response.json().await?;
        let envelope_xdr = tx.envelope_xdr.ok_or_else(|| RpcError::MissingField {
            tx_hash: tx_hash.to_string(),
            field: "envelope_xdr",
        })?;

        Ok(TransactionResponse {
            envelope_xdr,
            result_xdr: tx.result_xdr.unwrap_or_default(),
            result_meta_xdr: tx.result_meta_xdr.unwrap_or_default(),
        })
    }
}
