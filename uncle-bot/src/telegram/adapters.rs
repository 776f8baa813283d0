//! Conversion of teloxide types into the core model.

use teloxide::types::MessageEntityKind;

use crate::core::{Chat, Mention, Message, ToCoreMessage, ToCoreUser, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            is_bot: self.0.is_bot,
        }
    }
}

/// Telegram message to core message. Text is taken from `text` or, for media, `caption`.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                    is_bot: false,
                }),
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: chat_type(&msg.chat).to_string(),
            },
            thread_id: if msg.is_topic_message {
                msg.thread_id.map(|t| t.0 .0)
            } else {
                None
            },
            content: msg.text().or_else(|| msg.caption()).unwrap_or("").to_string(),
            mentions: self.mentions(),
            reply_to_message_id: msg.reply_to_message().map(|m| m.id.to_string()),
            reply_to_user_id: msg
                .reply_to_message()
                .and_then(|m| m.from.as_ref())
                .map(|u| u.id.0 as i64),
            created_at: msg.date,
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn mentions(&self) -> Vec<Mention> {
        let entities = self
            .0
            .parse_entities()
            .or_else(|| self.0.parse_caption_entities())
            .unwrap_or_default();
        entities
            .iter()
            .filter_map(|e| mention_from_entity(e.kind(), e.text()))
            .collect()
    }
}

/// Mention carried by one entity, if it is a mention.
pub(crate) fn mention_from_entity(kind: &MessageEntityKind, text: &str) -> Option<Mention> {
    match kind {
        MessageEntityKind::Mention => Some(Mention::Username(
            text.trim_start_matches('@').to_string(),
        )),
        MessageEntityKind::TextMention { user } => Some(Mention::User(user.id.0 as i64)),
        _ => None,
    }
}

fn chat_type(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    }
}
