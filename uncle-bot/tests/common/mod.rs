//! Shared helpers for uncle-bot integration tests.

#![allow(dead_code)]

pub mod mock_bot;
pub mod mock_llm;

use async_trait::async_trait;
use memory::{MemoryError, MemoryStore};
use prompt::ChatMessage;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use uncle_bot::{BotIdentity, Chat, Mention, Message, User};

pub const BOT_ID: i64 = 4242;
pub const BOT_USERNAME: &str = "uncle_bot";

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

pub fn identity() -> BotIdentity {
    BotIdentity::new(BOT_ID, BOT_USERNAME)
}

/// Plain group message from a human, addressing nobody.
pub fn message(chat_id: i64, user_id: i64, content: &str) -> Message {
    Message {
        id: NEXT_ID.fetch_add(1, Ordering::SeqCst).to_string(),
        user: User {
            id: user_id,
            username: Some(format!("user_{}", user_id)),
            first_name: Some(format!("User{}", user_id)),
            last_name: None,
            is_bot: false,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "group".to_string(),
        },
        thread_id: None,
        content: content.to_string(),
        mentions: Vec::new(),
        reply_to_message_id: None,
        reply_to_user_id: None,
        created_at: chrono::Utc::now(),
    }
}

/// Message that @mentions the bot, with the mention entity the transport would attach.
pub fn mention(chat_id: i64, user_id: i64, text: &str) -> Message {
    let mut msg = message(chat_id, user_id, &format!("@{} {}", BOT_USERNAME, text));
    msg.mentions.push(Mention::Username(BOT_USERNAME.to_string()));
    msg
}

/// Memory store whose every call fails.
#[derive(Default)]
pub struct FailingMemoryStore {
    pub appends: AtomicUsize,
}

#[async_trait]
impl MemoryStore for FailingMemoryStore {
    async fn load_history(&self, _conversation_id: &str) -> Result<Vec<ChatMessage>, MemoryError> {
        Err(MemoryError::Unavailable("store offline".to_string()))
    }

    async fn append_turn(&self, _conversation_id: &str, _turn: ChatMessage) -> Result<(), MemoryError> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        Err(MemoryError::Unavailable("store offline".to_string()))
    }
}
