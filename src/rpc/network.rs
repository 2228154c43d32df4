//! Ledger network selector

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a network name is not one of the supported environments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid network: {0}. Must be one of: testnet, mainnet, futurenet")]
pub struct NetworkParseError(pub String);

/// Ledger environment a transaction is fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    #[default]
    Mainnet,
    Futurenet,
}

impl Network {
    /// String representation for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Futurenet => "futurenet",
        }
    }

    /// Public Horizon endpoint for this network
    pub fn default_horizon_url(&self) -> &'static str {
        match self {
            Network::Testnet => "https://horizon-testnet.stellar.org",
            Network::Mainnet => "https://horizon.stellar.org",
            Network::Futurenet => "https://horizon-futurenet.stellar.org",
        }
    }
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            "futurenet" => Ok(Network::Futurenet),
            other => Err(NetworkParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
