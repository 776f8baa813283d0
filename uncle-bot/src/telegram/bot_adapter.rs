//! Wraps teloxide::Bot and implements [`crate::core::Bot`].

use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReplyParameters, ThreadId};
use tracing::warn;

use crate::core::{parse_message_id, Bot as CoreBot, BotError, Chat, Message, Result};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    /// Replies in the same chat and forum topic, quoting the triggering message.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(message.chat.id), text.to_string());
        if let Some(thread) = message.thread_id {
            request = request.message_thread_id(ThreadId(MessageId(thread)));
        }
        match parse_message_id(&message.id) {
            Ok(id) => request = request.reply_parameters(ReplyParameters::new(MessageId(id))),
            Err(e) => warn!(error = %e, "Replying without quote"),
        }
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
