//! Infrastructure layer for bot session persistence.
//!
//! Contains implementations of the ports defined in `botsession-core`:
//! the SQLite document store with its split reader/writer pool, and the
//! settings file loader.

pub mod config;
pub mod sqlite;
