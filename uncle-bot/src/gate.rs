//! Message gate: decides whether an inbound message is for the bot.
//!
//! A message is processed only when its author is not a bot and it addresses the bot by
//! @mention (entity or plain text) or by replying to one of the bot's messages. The gate is a
//! pure function of the message and the [`BotIdentity`] resolved at startup.

use crate::core::{Mention, Message};

/// The bot's own account, resolved once at startup (Telegram `getMe`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: i64,
    /// Username without the leading `@`.
    pub username: String,
}

impl BotIdentity {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id,
            username: username.trim_start_matches('@').to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageGate {
    identity: BotIdentity,
}

impl MessageGate {
    pub fn new(identity: BotIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    /// Rejects bot authors first, then anything that does not address the bot.
    pub fn should_process(&self, message: &Message) -> bool {
        if message.user.is_bot {
            return false;
        }
        self.addresses_bot(message)
    }

    /// True when the message mentions the bot or replies to it.
    pub fn addresses_bot(&self, message: &Message) -> bool {
        if message.reply_to_user_id == Some(self.identity.id) {
            return true;
        }
        let username = self.identity.username.as_str();
        let mentioned = message.mentions.iter().any(|m| match m {
            Mention::User(id) => *id == self.identity.id,
            Mention::Username(name) => {
                !username.is_empty()
                    && name.trim_start_matches('@').eq_ignore_ascii_case(username)
            }
        });
        mentioned || !handle_positions(&message.content, username).is_empty()
    }

    /// Message text with every `@<bot username>` removed, trimmed.
    pub fn extract_text(&self, message: &Message) -> String {
        strip_handle(&message.content, &self.identity.username)
            .trim()
            .to_string()
    }
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offsets of each `@username` in `text`, case-insensitive, with no username characters
/// on either side (`@uncle_bot` does not match inside `@uncle_bot_fan` or `support@uncle_bot.com`).
fn handle_positions(text: &str, username: &str) -> Vec<usize> {
    if username.is_empty() {
        return Vec::new();
    }
    let handle = format!("@{}", username.to_ascii_lowercase());
    let lower = text.to_ascii_lowercase();
    let mut positions = Vec::new();
    let mut from = 0;
    while let Some(offset) = lower[from..].find(&handle) {
        let start = from + offset;
        let end = start + handle.len();
        let before = lower[..start].chars().next_back().map_or(true, |c| !is_username_char(c));
        let after = lower[end..].chars().next().map_or(true, |c| !is_username_char(c));
        if before && after {
            positions.push(start);
        }
        from = end;
    }
    positions
}

fn strip_handle(text: &str, username: &str) -> String {
    let positions = handle_positions(text, username);
    if positions.is_empty() {
        return text.to_string();
    }
    let handle_len = username.len() + 1;
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for start in positions {
        out.push_str(&text[last..start]);
        last = start + handle_len;
    }
    out.push_str(&text[last..]);
    out
}
