//! Database migrations using a versioned migration pattern.
//!
//! Each migration runs exactly once and is tracked in the `schema_migrations` table.
//! Migrations are applied in order by version number.

use std::collections::HashSet;

use rusqlite::{params, Connection};

/// A database migration with a version number, name, and SQL to execute.
pub struct Migration {
    /// Unique version number (migrations run in order)
    pub version: i64,
    /// Human-readable name for the migration
    pub name: &'static str,
    /// SQL to execute (can be multiple statements)
    pub sql: &'static str,
}

/// All migrations in order. New migrations should be added at the end.
pub const MIGRATIONS: &[Migration] = &[
    // `timestamp` is RFC 3339 UTC with fixed nanosecond precision, so text
    // ordering matches chronological ordering.
    Migration {
        version: 1,
        name: "create_sessions_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tx_hash TEXT NOT NULL,
                network TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                error TEXT NOT NULL DEFAULT '',
                events TEXT NOT NULL DEFAULT '[]',
                logs TEXT NOT NULL DEFAULT '[]'
            );
        "#,
    },
    Migration {
        version: 2,
        name: "create_sessions_timestamp_index",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_sessions_timestamp ON sessions(timestamp DESC, id);
            CREATE INDEX IF NOT EXISTS idx_sessions_tx_hash ON sessions(tx_hash);
        "#,
    },
];

/// Create the schema_migrations table if it doesn't exist.
fn ensure_migrations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Get the set of already-applied migration versions.
fn get_applied_versions(conn: &Connection) -> rusqlite::Result<HashSet<i64>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations")?;
    let versions = stmt
        .query_map([], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<HashSet<i64>>>()?;
    Ok(versions)
}

/// Check if a table exists.
pub(crate) fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [table],
        |row| row.get::<_, i64>(0).map(|c| c > 0),
    )
}

/// Check if an index exists.
fn index_exists(conn: &Connection, index: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?1",
        [index],
        |row| row.get::<_, i64>(0).map(|c| c > 0),
    )
}

/// Adopt session databases written before migrations were tracked.
///
/// Older builds created the `sessions` table directly. Any migration whose
/// changes already exist is marked as applied without re-running it.
fn bootstrap_existing_database(conn: &mut Connection) -> rusqlite::Result<()> {
    if !table_exists(conn, "sessions")? {
        return Ok(());
    }

    let applied = get_applied_versions(conn)?;
    let mut to_mark: Vec<&Migration> = Vec::new();
    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            continue;
        }
        let already_applied = match migration.version {
            1 => table_exists(conn, "sessions")?,
            2 => index_exists(conn, "idx_sessions_timestamp")?,
            _ => false,
        };
        if already_applied {
            to_mark.push(migration);
        }
    }

    if to_mark.is_empty() {
        return Ok(());
    }

    tracing::info!(
        count = to_mark.len(),
        "Bootstrapping existing session database into migration system"
    );

    let now = chrono::Utc::now().to_rfc3339();
    let tx = conn.transaction()?;
    for migration in to_mark {
        tx.execute(
            "INSERT OR IGNORE INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![migration.version, migration.name, now],
        )?;
    }
    tx.commit()
}

/// Run all pending migrations.
///
/// This is the main entry point for the migration system.
pub fn run_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    ensure_migrations_table(conn)?;
    bootstrap_existing_database(conn)?;

    let applied = get_applied_versions(conn)?;

    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            continue;
        }

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        // Execute the migration SQL and record it within a single transaction for atomicity
        let now = chrono::Utc::now().to_rfc3339();
        let result = conn.transaction().and_then(|tx| {
            tx.execute_batch(migration.sql)?;
            tx.execute(
                "INSERT OR IGNORE INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
                params![migration.version, migration.name, now],
            )?;
            tx.commit()
        });
        if let Err(e) = result {
            tracing::error!(
                version = migration.version,
                name = migration.name,
                error = %e,
                "Migration failed"
            );
            return Err(e);
        }
    }

    Ok(())
}
