//! `erst debug`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::DebugArgs;
use crate::config::Config;
use crate::data::{Database, SessionStore};
use crate::debugger::{DebugConfig, DebugReport, Debugger, HistoryOutcome};
use crate::rpc::HorizonClient;
use crate::simulator::ProcessRunner;

pub async fn run(args: DebugArgs, config: &Config) -> Result<()> {
    let network = args.network.unwrap_or(config.default_network);
    let debug_config = DebugConfig::new(args.tx_hash, network)
        .with_rpc_url(args.rpc_url)
        .with_profile(args.profile);

    println!("Debugging transaction: {}", debug_config.tx_hash);
    println!("Network: {}", network);
    if let Some(url) = &debug_config.rpc_url {
        println!("RPC URL: {}", url);
    }

    let url = config.rpc.url_for(network, debug_config.rpc_url.as_deref());
    let rpc = HorizonClient::with_url(url, network, config.rpc.timeout)
        .context("failed to create RPC client")?;
    let simulator = ProcessRunner::discover(config.simulator_path.as_deref())
        .context("failed to create simulator runner")?;
    tracing::debug!(binary = %simulator.binary().display(), "Using simulator");
    let store = Database::open_with_timeout(&config.storage.database, config.storage.busy_timeout)
        .map(|db| SessionStore::new(db.connection()));

    let debugger = Debugger::new(rpc, simulator, store);
    let tx = debugger.fetch(&debug_config).await?;
    println!(
        "Transaction fetched successfully. Envelope size: {} bytes",
        tx.envelope_xdr.len()
    );

    let report = debugger.replay(&debug_config, tx).await?;
    println!("{}", render_report(&report));

    if let Some(svg) = &report.response.flamegraph {
        let path = flamegraph_path(Path::new("."), &report.tx_hash);
        match std::fs::write(&path, svg) {
            Ok(()) => println!("Flamegraph written to {}", path.display()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write flamegraph");
                println!("Warning: failed to write flamegraph: {}", e);
            }
        }
    }

    Ok(())
}

/// Simulation outcome and history status of a finished run
pub fn render_report(report: &DebugReport) -> String {
    let mut lines = vec![format!(
        "Simulation completed. Status: {}",
        report.response.status
    )];
    if !report.response.error.is_empty() {
        lines.push(format!("Error: {}", report.response.error));
    }
    lines.push(match &report.history {
        HistoryOutcome::Saved(_) => "Session saved to history.".to_string(),
        HistoryOutcome::Unavailable(e) => {
            format!("Warning: failed to open sessions database: {}", e)
        }
        HistoryOutcome::Failed(e) => format!("Warning: failed to save session: {}", e),
    });
    lines.join("\n")
}

/// `<dir>/<hash>.flamegraph.svg`, keeping only hash characters safe in a file name
fn flamegraph_path(dir: &Path, tx_hash: &str) -> PathBuf {
    let stem: String = tx_hash
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    dir.join(format!("{}.flamegraph.svg", stem))
}
