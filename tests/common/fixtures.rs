//! Session and store fixtures

use std::path::Path;

use chrono::{DateTime, Utc};
use erst::{Database, Network, Session, SessionStore};
use tempfile::TempDir;

/// Open a file-backed store in a fresh temporary directory
pub fn create_test_store() -> (Database, SessionStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open(dir.path().join("sessions.db")).expect("Failed to open database");
    let store = SessionStore::new(db.connection());
    (db, store, dir)
}

/// Open a second, independent handle on an existing database file
pub fn open_store(path: &Path) -> SessionStore {
    let db = Database::open(path).expect("Failed to open database");
    SessionStore::new(db.connection())
}

/// Failed session whose events mention `contract` with a `topic`
pub fn failed_session(
    tx_hash: &str,
    timestamp: DateTime<Utc>,
    error: &str,
    contract: &str,
    topic: &str,
) -> Session {
    Session::new(
        tx_hash,
        Network::Testnet,
        timestamp,
        error,
        format!(r#"[{{"contract":"{contract}","topics":["{topic}"]}}]"#),
        r#"["host fn invoked"]"#,
    )
}

pub fn successful_session(tx_hash: &str, timestamp: DateTime<Utc>) -> Session {
    Session::new(tx_hash, Network::Mainnet, timestamp, "", "[]", "[]")
}
