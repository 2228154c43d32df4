//! Session data access object

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result as SqliteResult, TransactionBehavior};

use super::error::StoreError;
use super::filter::SearchFilters;
use super::models::Session;
use crate::rpc::Network;

const SELECT_SESSIONS: &str = "SELECT id, tx_hash, network, timestamp, error, events, logs
     FROM sessions ORDER BY timestamp DESC, id ASC";

/// Append-only store of simulation sessions
#[derive(Clone)]
pub struct SessionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SessionStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Append a session and return its row id
    ///
    /// Every call inserts a new row; repeated runs against the same
    /// transaction are kept as separate history entries.
    pub fn save_session(&self, session: &Session) -> Result<i64, StoreError> {
        if session.tx_hash().is_empty() {
            return Err(StoreError::InvalidRecord("tx_hash must not be empty"));
        }

        let mut conn = self.lock()?;
        // IMMEDIATE takes the write lock up front, so concurrent writers queue
        // on the busy timeout instead of failing mid-transaction
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::Persistence)?;
        tx.execute(
            "INSERT INTO sessions (tx_hash, network, timestamp, error, events, logs)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.tx_hash(),
                session.network().as_str(),
                encode_timestamp(session.timestamp()),
                session.error(),
                session.events(),
                session.logs(),
            ],
        )
        .map_err(StoreError::Persistence)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(StoreError::Persistence)?;

        tracing::debug!(
            id,
            tx_hash = %session.tx_hash(),
            network = %session.network(),
            "Saved session"
        );
        Ok(id)
    }

    /// Return every session matching `filters`, most recent first
    ///
    /// Sessions with equal timestamps keep insertion order. Any row that
    /// cannot be decoded fails the whole search.
    pub fn search_sessions(&self, filters: &SearchFilters) -> Result<Vec<Session>, StoreError> {
        let filter = filters.compile()?;

        let conn = self.lock()?;
        let mut stmt = conn.prepare(SELECT_SESSIONS).map_err(StoreError::Query)?;
        let rows = stmt
            .query_map([], Self::row_to_session)
            .map_err(StoreError::Query)?;

        let mut matched = Vec::new();
        for row in rows {
            let session = row.map_err(StoreError::Query)?;
            if filter.matches(&session) {
                matched.push(session);
            }
        }

        tracing::debug!(
            matched = matched.len(),
            unfiltered = filters.is_empty(),
            use_regex = filters.use_regex,
            "Searched sessions"
        );
        Ok(matched)
    }

    /// Number of stored sessions
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .map_err(StoreError::Query)?;
        Ok(count as usize)
    }

    /// Convert a database row to a Session
    /// Uses named column access for resilience to SELECT reordering
    fn row_to_session(row: &rusqlite::Row) -> SqliteResult<Session> {
        let network_raw: String = row.get("network")?;
        let network = network_raw.parse::<Network>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
        })?;
        let timestamp_raw: String = row.get("timestamp")?;
        let timestamp = decode_timestamp(&timestamp_raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
        })?;

        Ok(Session::new(
            row.get::<_, String>("tx_hash")?,
            network,
            timestamp,
            row.get::<_, String>("error")?,
            row.get::<_, String>("events")?,
            row.get::<_, String>("logs")?,
        ))
    }
}

/// Fixed-width UTC form; lexicographic order equals chronological order
fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
