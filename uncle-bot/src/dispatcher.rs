//! Per-conversation queueing in front of the orchestrator.
//!
//! Messages for one conversation are handled strictly in dispatch order by a single worker task;
//! different conversations run concurrently. Workers are created lazily on the first accepted
//! message of a conversation and stop after [`DEFAULT_IDLE_TIMEOUT`] without messages; the next
//! message starts a fresh one.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::core::Message;
use crate::orchestrator::{ConversationOrchestrator, Outcome};

/// How long a conversation worker waits for its next message before stopping.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

type Queues = Arc<DashMap<String, mpsc::UnboundedSender<Message>>>;

pub struct ConversationDispatcher {
    orchestrator: Arc<ConversationOrchestrator>,
    queues: Queues,
    idle_timeout: Duration,
}

impl ConversationDispatcher {
    pub fn new(orchestrator: Arc<ConversationOrchestrator>) -> Self {
        Self {
            orchestrator,
            queues: Arc::new(DashMap::new()),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Gates `message` and enqueues it on its conversation's worker. Returns false when the
    /// gate rejected it. Must be called inside a tokio runtime.
    pub fn dispatch(&self, message: Message) -> bool {
        if !self.orchestrator.gate().should_process(&message) {
            debug!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Message not addressed to bot, not queued"
            );
            return false;
        }

        let conversation_id = message.conversation_id();
        // Send while holding the entry lock; idle workers retire under the same lock.
        let mut tx = self
            .queues
            .entry(conversation_id.clone())
            .or_insert_with(|| self.spawn_worker(conversation_id.clone()));

        if let Err(mpsc::error::SendError(message)) = tx.send(message) {
            // Worker is gone; replace it and retry once.
            error!(conversation_id = %conversation_id, "Conversation worker stopped, restarting");
            *tx = self.spawn_worker(conversation_id.clone());
            if tx.send(message).is_err() {
                error!(conversation_id = %conversation_id, "Failed to queue message");
                return false;
            }
        }
        true
    }

    /// Number of conversations with a live worker.
    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    fn spawn_worker(&self, conversation_id: String) -> mpsc::UnboundedSender<Message> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        let orchestrator = self.orchestrator.clone();
        let queues = self.queues.clone();
        let idle_timeout = self.idle_timeout;
        let own = tx.clone();
        info!(conversation_id = %conversation_id, "Starting conversation worker");

        tokio::spawn(async move {
            loop {
                let message = match tokio::time::timeout(idle_timeout, rx.recv()).await {
                    Ok(Some(message)) => message,
                    Ok(None) => break,
                    Err(_) => {
                        // Retire only if the map still points at this worker and nothing is queued.
                        let retired = queues
                            .remove_if(&conversation_id, |_, tx| tx.same_channel(&own) && rx.is_empty())
                            .is_some();
                        let still_ours = queues
                            .get(&conversation_id)
                            .is_some_and(|tx| tx.same_channel(&own));
                        if retired || !still_ours {
                            debug!(conversation_id = %conversation_id, "Conversation worker idle, stopping");
                            break;
                        }
                        continue;
                    }
                };
                info!(
                    user_id = message.user.id,
                    conversation_id = %conversation_id,
                    "Processing queued message"
                );
                match orchestrator.on_message(&message).await {
                    Outcome::Replied(_) | Outcome::Ignored => {}
                    Outcome::Failed(e) => {
                        error!(error = %e, user_id = message.user.id, conversation_id = %conversation_id, "Message produced no reply");
                    }
                }
            }
        });

        tx
    }
}
