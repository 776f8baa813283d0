//! Outbound reply channel.
//!
//! [`Bot`] is transport-agnostic; `TelegramBotAdapter` implements it via teloxide and tests
//! substitute a recording double.

use async_trait::async_trait;

use crate::core::error::{BotError, Result};
use crate::core::types::{Chat, Message};

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends `text` as a reply to `message` (same chat and thread).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
}

/// Parses a transport message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Bot(format!("Invalid message_id: {}", s)))
}
