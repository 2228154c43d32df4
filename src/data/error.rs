//! Session store errors

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Search criterion a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Error,
    Event,
    Contract,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Error => "error",
            Criterion::Event => "event",
            Criterion::Contract => "contract",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure class of a store operation, as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The store could not be opened; history is unavailable
    Unavailable,
    /// A session could not be written
    Persistence,
    /// A search could not be evaluated
    Query,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to create data directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session database unavailable at {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("session database lock poisoned")]
    LockPoisoned,
    #[error("invalid session record: {0}")]
    InvalidRecord(&'static str),
    #[error("failed to save session: {0}")]
    Persistence(#[source] rusqlite::Error),
    #[error("invalid {criterion} pattern: {source}")]
    InvalidPattern {
        criterion: Criterion,
        #[source]
        source: regex::Error,
    },
    #[error("failed to read sessions: {0}")]
    Query(#[source] rusqlite::Error),
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::CreateDir { .. }
            | StoreError::Unavailable { .. }
            | StoreError::LockPoisoned => StoreErrorKind::Unavailable,
            StoreError::InvalidRecord(_) | StoreError::Persistence(_) => {
                StoreErrorKind::Persistence
            }
            StoreError::InvalidPattern { .. } | StoreError::Query(_) => StoreErrorKind::Query,
        }
    }
}
