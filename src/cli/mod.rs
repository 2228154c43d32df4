//! Command-line surface
//!
//! Argument parsing and output formatting only; the work happens in
//! [`crate::debugger`] and [`crate::data`].

pub mod debug;
pub mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::rpc::Network;

#[derive(Debug, Parser)]
#[command(name = "erst")]
#[command(about = "Debug failed Soroban transactions and search past sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the session database, logs and config (default: $ERST_HOME or ~/.erst)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Debug a failed Soroban transaction
    #[command(
        long_about = "Fetch a transaction envelope from the Stellar network, replay it in the simulator and record the outcome.\n\nExample:\n  erst debug 5c0a1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab\n  erst debug --network testnet <tx-hash>"
    )]
    Debug(DebugArgs),
    /// Search past debugging sessions
    Search(SearchArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct DebugArgs {
    /// Hash of the transaction to debug
    #[arg(value_name = "TX_HASH")]
    pub tx_hash: String,

    /// Stellar network to use (testnet, mainnet, futurenet)
    #[arg(short, long)]
    pub network: Option<Network>,

    /// Custom Horizon RPC URL to use
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Ask the simulator for a flamegraph and write it to the current directory
    #[arg(long)]
    pub profile: bool,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct SearchArgs {
    /// Filter by error message
    #[arg(long)]
    pub error: Option<String>,

    /// Search within diagnostic events
    #[arg(long)]
    pub event: Option<String>,

    /// Filter by contract ID
    #[arg(long)]
    pub contract: Option<String>,

    /// Enable regex matching
    #[arg(long)]
    pub regex: bool,

    /// Show at most this many sessions
    #[arg(long)]
    pub limit: Option<usize>,
}
