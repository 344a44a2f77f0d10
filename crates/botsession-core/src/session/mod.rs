//! Per-update session state.
//!
//! - `tracked` -- `TrackedSession`, the change-tracking view over a loaded record
//! - `equality` -- structural equality used to decide whether a write changed anything
//! - `key` -- session key resolvers

pub mod equality;
pub mod key;
pub mod tracked;

pub use equality::deep_equal;
pub use key::{chat_key, chat_sender_key, KeyResolver};
pub use tracked::{ChangeSet, TrackedSession};
