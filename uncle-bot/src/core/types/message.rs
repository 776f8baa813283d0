//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// One addressee parsed from the message by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mention {
    /// `@name` entity; stored without the leading `@`.
    Username(String),
    /// Mention of a user without a username, by id.
    User(i64),
}

/// A single inbound message. Created by the transport adapter, consumed once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Forum topic, when the message belongs to one.
    pub thread_id: Option<i32>,
    pub content: String,
    pub mentions: Vec<Mention>,
    pub reply_to_message_id: Option<String>,
    /// Author of the replied-to message.
    pub reply_to_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Memory key: the chat id, suffixed with `:<thread>` inside a forum topic.
    pub fn conversation_id(&self) -> String {
        match self.thread_id {
            Some(thread) => format!("{}:{}", self.chat.id, thread),
            None => self.chat.id.to_string(),
        }
    }
}
