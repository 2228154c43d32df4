//! `erst search`

use anyhow::{Context, Result};

use super::SearchArgs;
use crate::config::Config;
use crate::data::{Database, SearchFilters, Session, SessionStore};

impl SearchArgs {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            error: self.error.clone(),
            event: self.event.clone(),
            contract: self.contract.clone(),
            use_regex: self.regex,
        }
    }
}

pub fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let db = Database::open_with_timeout(&config.storage.database, config.storage.busy_timeout)
        .context("failed to open database")?;
    let store = SessionStore::new(db.connection());

    let sessions = store
        .search_sessions(&args.filters())
        .context("search failed")?;

    println!("{}", render_sessions(&sessions, args.limit));
    Ok(())
}

/// Listing of matching sessions, most recent first
pub fn render_sessions(sessions: &[Session], limit: Option<usize>) -> String {
    if sessions.is_empty() {
        return "No matching sessions found.".to_string();
    }

    let mut lines = vec![
        format!("Found {} matching sessions:", sessions.len()),
        String::new(),
    ];
    let shown = limit.unwrap_or(sessions.len()).min(sessions.len());
    for session in &sessions[..shown] {
        lines.push(format!(
            "[{}] {} | Network: {}",
            session.timestamp().format("%Y-%m-%d %H:%M:%S"),
            session.tx_hash(),
            session.network()
        ));
        if !session.error().is_empty() {
            lines.push(format!("  Error: {}", session.error()));
        }
        lines.push("-".repeat(40));
    }
    if shown < sessions.len() {
        lines.push(format!("({} more not shown)", sessions.len() - shown));
    }
    lines.join("\n")
}
