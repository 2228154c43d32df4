//! Integration tests for erst
//!
//! These exercise the store, the debug workflow and the binary together.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod debug_workflow;
pub mod session_history;
