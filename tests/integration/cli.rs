//! Tests for the `erst` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::determinism::test_now;
use super::common::fixtures::{failed_session, open_store};

fn erst(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("erst").expect("binary should build");
    cmd.arg("--data-dir")
        .arg(data_dir.path())
        .env_remove("ERST_HOME")
        .env_remove("ERST_SIMULATOR_PATH")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_search_on_empty_history() {
    let dir = TempDir::new().unwrap();
    erst(&dir)
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::eq("No matching sessions found.\n"));

    assert!(dir.path().join("sessions.db").exists());
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_search_lists_matches() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("sessions.db"));
    store
        .save_session(&failed_session("abc", test_now(), "trap: out of gas", "C123", "transfer"))
        .unwrap();
    store
        .save_session(&failed_session("def", test_now(), "panic", "C999", "mint"))
        .unwrap();

    erst(&dir)
        .args(["search", "--contract", "C123"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Found 1 matching sessions:\n\n"))
        .stdout(predicate::str::contains(
            "[2024-01-01 00:00:00] abc | Network: testnet\n  Error: trap: out of gas\n",
        ))
        .stdout(predicate::str::contains("def").not());
}

#[test]
fn test_invalid_regex_fails_search() {
    let dir = TempDir::new().unwrap();
    erst(&dir)
        .args(["search", "--error", "(unclosed", "--regex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search failed"));
}

#[test]
fn test_invalid_network_is_rejected() {
    let dir = TempDir::new().unwrap();
    erst(&dir)
        .args(["debug", "--network", "devnet", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid network"));
}

#[test]
fn test_missing_simulator_fails_debug() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[simulator]\npath = \"/nonexistent/erst-sim\"\n",
    )
    .unwrap();

    erst(&dir)
        .args(["debug", "--network", "testnet", "abc"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Debugging transaction: abc"))
        .stderr(predicate::str::contains("failed to create simulator runner"));
}
