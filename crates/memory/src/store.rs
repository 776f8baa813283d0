//! # Memory Storage
//!
//! The [`MemoryStore`] trait: load a conversation's history, append one turn.
//!
//! Every call is scoped by `conversation_id`; a store never returns turns recorded under
//! another id. Implementations must keep turns in append order.

use async_trait::async_trait;
use prompt::ChatMessage;

use crate::error::MemoryError;

/// Conversation memory keyed by conversation id.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Turns in chronological order; empty when nothing was recorded yet.
    async fn load_history(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, MemoryError>;

    /// Appends one turn. Always appends; repeated calls with the same turn store it twice.
    async fn append_turn(&self, conversation_id: &str, turn: ChatMessage) -> Result<(), MemoryError>;
}
