//! Data persistence layer for erst
//!
//! This module provides SQLite-based storage for debugging sessions and the
//! filters used to search them.

mod database;
mod error;
mod filter;
mod migrations;
mod models;
mod session;

pub use database::{Database, DEFAULT_BUSY_TIMEOUT};
pub use error::{Criterion, StoreError, StoreErrorKind};
pub use filter::{SearchFilters, SessionFilter};
pub use models::Session;
pub use session::SessionStore;
