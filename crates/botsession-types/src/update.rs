//! Incoming update payload as delivered by the host bot framework.

use serde::{Deserialize, Serialize};

/// The chat an update belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRef {
    pub id: i64,
}

/// The user that sent an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderRef {
    pub id: i64,
}

/// A single incoming update.
///
/// Channel posts and some service updates carry no sender; inline queries
/// carry no chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<SenderRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Update {
    /// An update from `sender_id` in `chat_id`.
    pub fn message(update_id: i64, chat_id: i64, sender_id: i64, text: impl Into<String>) -> Self {
        Self {
            update_id,
            chat: Some(ChatRef { id: chat_id }),
            from: Some(SenderRef { id: sender_id }),
            text: Some(text.into()),
        }
    }
}
