//! Shared test utilities
//!
//! - Deterministic timestamps
//! - Session and store fixtures

pub mod determinism;
pub mod fixtures;
