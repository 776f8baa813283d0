//! Mock implementation of [`uncle_bot::Bot`] for integration tests.
//!
//! Records every reply so tests can wait for it and assert on the text without hitting Telegram.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use uncle_bot::{Bot, BotError, Chat, Message, Result};

/// One recorded outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    pub chat_id: i64,
    /// Id of the message replied to; None for plain sends.
    pub reply_to: Option<String>,
    pub text: String,
}

pub struct MockBot {
    sent_tx: mpsc::UnboundedSender<SentRecord>,
    fail: AtomicBool,
}

impl MockBot {
    /// Creates a MockBot and returns the receiver for sent records.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<SentRecord>) {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        let bot = Arc::new(Self {
            sent_tx,
            fail: AtomicBool::new(false),
        });
        (bot, sent_rx)
    }

    /// Makes every later send fail after recording it.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn result(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(BotError::Bot("telegram unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let _ = self.sent_tx.send(SentRecord {
            chat_id: chat.id,
            reply_to: None,
            text: text.to_string(),
        });
        self.result()
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let _ = self.sent_tx.send(SentRecord {
            chat_id: message.chat.id,
            reply_to: Some(message.id.clone()),
            text: text.to_string(),
        });
        self.result()
    }
}
