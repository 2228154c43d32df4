//! Integration tests for the fetch, simulate, record workflow

use super::common::fixtures::{create_test_store, open_store};
use erst::rpc::{MockRpcClient, TransactionResponse};
use erst::simulator::{MockRunError, MockSimulatorRunner};
use erst::{
    DebugConfig, DebugError, Debugger, HistoryOutcome, Network, SearchFilters, SimulationResponse,
    StoreError,
};
use serde_json::json;

fn transaction() -> TransactionResponse {
    TransactionResponse {
        envelope_xdr: "AAAAAgAAAABkZWFkYmVlZg==".into(),
        result_xdr: "AAAAAAAAAGT/////".into(),
        result_meta_xdr: "AAAAAwAAAAAAAAAC".into(),
    }
}

fn out_of_gas() -> SimulationResponse {
    SimulationResponse {
        status: "failed".into(),
        error: "trap: out of gas".into(),
        events: vec![json!({
            "contract": "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC",
            "topics": ["transfer"],
        })],
        logs: vec!["invoking transfer".into(), "budget exceeded".into()],
        flamegraph: None,
    }
}

#[tokio::test]
async fn test_debug_runs_are_searchable() {
    let (db, store, _dir) = create_test_store();
    let debugger = Debugger::new(
        MockRpcClient::new(Network::Futurenet, transaction()),
        MockSimulatorRunner::new(out_of_gas()),
        Ok(store),
    );
    let config = DebugConfig::new("deadbeef", Network::Futurenet);

    let first = debugger.run(&config).await.unwrap();
    let second = debugger.run(&config).await.unwrap();
    assert!(matches!(first.history, HistoryOutcome::Saved(_)));
    assert!(matches!(second.history, HistoryOutcome::Saved(_)));

    // Another process would see the same history
    let reader = open_store(&db.path);
    let found = reader
        .search_sessions(
            &SearchFilters::new()
                .with_contract(r"CDLZ\w+")
                .with_error("gas$")
                .with_regex(true),
        )
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.tx_hash() == "deadbeef"));
    assert_eq!(found[0].network(), Network::Futurenet);
    assert_eq!(
        found[0].decoded_logs().unwrap(),
        vec!["invoking transfer", "budget exceeded"]
    );
}

#[tokio::test]
async fn test_history_failure_still_returns_result() {
    let debugger = Debugger::new(
        MockRpcClient::new(Network::Testnet, transaction()),
        MockSimulatorRunner::new(out_of_gas()),
        Err(StoreError::LockPoisoned),
    );

    let report = debugger
        .run(&DebugConfig::new("deadbeef", Network::Testnet))
        .await
        .unwrap();
    assert_eq!(report.response.error, "trap: out of gas");
    assert!(matches!(report.history, HistoryOutcome::Unavailable(_)));
}

#[tokio::test]
async fn test_simulator_failure_is_fatal_and_unrecorded() {
    let (_db, store, _dir) = create_test_store();
    let debugger = Debugger::new(
        MockRpcClient::new(Network::Testnet, transaction()),
        MockSimulatorRunner::failing(MockRunError::BinaryNotFound),
        Ok(store.clone()),
    );

    let err = debugger
        .run(&DebugConfig::new("deadbeef", Network::Testnet))
        .await
        .unwrap_err();
    assert!(matches!(err, DebugError::Simulation(_)));
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_network_mismatch_is_rejected() {
    let rpc = MockRpcClient::new(Network::Mainnet, transaction());
    let debugger = Debugger::new(
        rpc.clone(),
        MockSimulatorRunner::new(out_of_gas()),
        Err(StoreError::LockPoisoned),
    );

    let err = debugger
        .run(&DebugConfig::new("deadbeef", Network::Testnet))
        .await
        .unwrap_err();
    assert!(matches!(err, DebugError::Validation(_)));
    assert!(rpc.requests().is_empty());
}
