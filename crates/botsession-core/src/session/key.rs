//! Session key resolvers.
//!
//! A resolver maps an update to the key of the session it belongs to, or
//! `None` when the update should bypass session handling entirely.

use std::sync::Arc;

use crate::middleware::context::UpdateContext;

/// Shared, caller-supplied key resolver.
pub type KeyResolver = Arc<dyn Fn(&UpdateContext) -> Option<String> + Send + Sync>;

/// One session per user per chat: `"{chat_id}:{sender_id}"`.
///
/// Returns `None` when the update has no chat or no sender.
pub fn chat_sender_key(ctx: &UpdateContext) -> Option<String> {
    let chat = ctx.chat_id()?;
    let sender = ctx.sender_id()?;
    Some(format!("{chat}:{sender}"))
}

/// One session shared by everyone in a chat: `"{chat_id}"`.
pub fn chat_key(ctx: &UpdateContext) -> Option<String> {
    ctx.chat_id().map(|chat| chat.to_string())
}
