//! Change-tracking view over a loaded session.
//!
//! `TrackedSession` owns the session fields for the lifetime of one update.
//! Reads pass through; writes and removals also update a `ChangeSet` and the
//! dirty flag. The change set is bookkeeping only: saving always writes the
//! full field map.

use std::collections::{BTreeMap, BTreeSet};

use botsession_types::error::SessionError;
use botsession_types::session::{ID_FIELD, SessionData, SessionRecord};
use serde_json::Value;

use super::equality::deep_equal;

/// Fields set or removed since the session was loaded.
///
/// A field is never in both collections at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    pending_sets: BTreeMap<String, Value>,
    pending_removals: BTreeSet<String>,
}

impl ChangeSet {
    /// Fields written with a changed value, and the value written.
    pub fn pending_sets(&self) -> &BTreeMap<String, Value> {
        &self.pending_sets
    }

    /// Fields removed.
    pub fn pending_removals(&self) -> &BTreeSet<String> {
        &self.pending_removals
    }

    pub fn is_empty(&self) -> bool {
        self.pending_sets.is_empty() && self.pending_removals.is_empty()
    }

    fn record_set(&mut self, field: &str, value: &Value) {
        self.pending_removals.remove(field);
        self.pending_sets.insert(field.to_string(), value.clone());
    }

    fn record_removal(&mut self, field: &str) {
        self.pending_sets.remove(field);
        self.pending_removals.insert(field.to_string());
    }
}

/// A session's fields plus the changes made to them during one update.
#[derive(Debug, Clone, Default)]
pub struct TrackedSession {
    data: SessionData,
    changes: ChangeSet,
    dirty: bool,
}

impl TrackedSession {
    /// Start tracking `data` with a clean change set.
    pub fn new(mut data: SessionData) -> Self {
        data.remove(ID_FIELD);
        Self {
            data,
            changes: ChangeSet::default(),
            dirty: false,
        }
    }

    /// Start tracking the fields of a loaded record.
    pub fn from_record(record: SessionRecord) -> Self {
        Self::new(record.data)
    }

    /// Read a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    /// Write a field.
    ///
    /// The session becomes dirty when the field was absent or held a value
    /// that is not structurally equal to `value`. Writing an equal value
    /// leaves the dirty flag alone but still cancels a pending removal of
    /// the field.
    ///
    /// # Errors
    ///
    /// `SessionError::Validation` when `field` is the reserved `id` field.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Result<(), SessionError> {
        let field = field.into();
        if field == ID_FIELD {
            return Err(SessionError::Validation(format!(
                "`{ID_FIELD}` is the session key and cannot be set"
            )));
        }

        let changed = match self.data.get(&field) {
            Some(current) => !deep_equal(current, &value),
            None => true,
        };
        if changed {
            tracing::debug!(field = %field, "setting field made session dirty");
            self.dirty = true;
            self.changes.record_set(&field, &value);
        } else {
            self.changes.pending_removals.remove(&field);
        }
        self.data.insert(field, value);
        Ok(())
    }

    /// Remove a field, returning its previous value.
    ///
    /// Always marks the session dirty, even when the field was absent.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        tracing::debug!(field, "removing session field");
        let previous = self.data.remove(field);
        self.changes.record_removal(field);
        self.dirty = true;
        previous
    }

    /// Whether any field changed since the session was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Current fields.
    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replace every field at once.
    ///
    /// Bypasses change tracking: the dirty flag and change set keep their
    /// current state. Any `id` entry in `data` is dropped.
    pub fn replace(&mut self, mut data: SessionData) {
        data.remove(ID_FIELD);
        self.data = data;
    }

    /// Consume the view, returning the final fields.
    pub fn into_data(self) -> SessionData {
        self.data
    }
}
