//! Shared domain types for bot session persistence.
//!
//! This crate contains the types passed between the session layers:
//! session records, incoming updates, settings, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod session;
pub mod update;
