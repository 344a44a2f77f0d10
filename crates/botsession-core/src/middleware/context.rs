//! Per-update context.
//!
//! `UpdateContext` wraps the incoming [`Update`] and holds the sessions that
//! middleware installed for it, one slot per configured property name.
//! Downstream handlers read and mutate a session through its slot.

use std::collections::HashMap;

use botsession_types::session::SessionData;
use botsession_types::update::Update;

use crate::session::tracked::TrackedSession;

/// State flowing through the handler chain for a single update.
#[derive(Debug, Clone, Default)]
pub struct UpdateContext {
    pub update: Update,
    sessions: HashMap<String, TrackedSession>,
}

impl UpdateContext {
    pub fn new(update: Update) -> Self {
        Self {
            update,
            sessions: HashMap::new(),
        }
    }

    /// Id of the chat the update belongs to.
    pub fn chat_id(&self) -> Option<i64> {
        self.update.chat.map(|chat| chat.id)
    }

    /// Id of the user who sent the update.
    pub fn sender_id(&self) -> Option<i64> {
        self.update.from.map(|from| from.id)
    }

    /// The session installed under `property`, if any.
    pub fn session(&self, property: &str) -> Option<&TrackedSession> {
        self.sessions.get(property)
    }

    /// Mutable access to the session installed under `property`.
    pub fn session_mut(&mut self, property: &str) -> Option<&mut TrackedSession> {
        self.sessions.get_mut(property)
    }

    /// Replace the content of the session under `property` wholesale.
    ///
    /// Bypasses change tracking. Creates the slot if none is installed.
    pub fn set_session(&mut self, property: &str, data: SessionData) {
        match self.sessions.get_mut(property) {
            Some(session) => session.replace(data),
            None => {
                self.sessions
                    .insert(property.to_string(), TrackedSession::new(data));
            }
        }
    }

    /// Remove the session under `property`. A removed session is saved as
    /// absent, which deletes the stored record.
    pub fn remove_session(&mut self, property: &str) -> Option<TrackedSession> {
        self.sessions.remove(property)
    }

    pub(crate) fn install_session(&mut self, property: &str, session: TrackedSession) {
        self.sessions.insert(property.to_string(), session);
    }
}
