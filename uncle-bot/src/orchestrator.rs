//! Conversation orchestrator: gate, load memory, assemble prompt, complete, record, reply.
//!
//! Every per-message failure is handled here. [`ConversationOrchestrator::on_message`] returns an
//! [`Outcome`] and never an error, so one bad message cannot take down the event loop.

use llm_client::{CompletionError, CompletionInvoker};
use memory::MemoryStore;
use prompt::{ChatMessage, PromptError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::core::{Bot, Message};
use crate::gate::MessageGate;

/// Notice sent when a completion fails and the policy is [`FailurePolicy::Notice`].
pub const DEFAULT_FAILURE_NOTICE: &str = "Error processing message";

/// What the user sees when a completion fails. Never internal error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    Silent,
    Notice(String),
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Notice(DEFAULT_FAILURE_NOTICE.to_string())
    }
}

impl FailurePolicy {
    /// `None` or a blank notice means stay silent.
    pub fn from_notice(notice: Option<&str>) -> Self {
        match notice.map(str::trim) {
            Some(text) if !text.is_empty() => FailurePolicy::Notice(text.to_string()),
            _ => FailurePolicy::Silent,
        }
    }
}

/// Why a message produced no reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected by the gate; nothing happened.
    Ignored,
    /// Reply text that was recorded and sent.
    Replied(String),
    Failed(ProcessError),
}

/// Wires the gate, memory, prompt assembly, completion and reply delivery. Stateless between
/// calls; all conversation state lives in the memory store.
pub struct ConversationOrchestrator {
    gate: MessageGate,
    memory: Arc<dyn MemoryStore>,
    invoker: CompletionInvoker,
    bot: Arc<dyn Bot>,
    system_instruction: String,
    failure_policy: FailurePolicy,
}

impl ConversationOrchestrator {
    pub fn new(
        gate: MessageGate,
        memory: Arc<dyn MemoryStore>,
        invoker: CompletionInvoker,
        bot: Arc<dyn Bot>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            gate,
            memory,
            invoker,
            bot,
            system_instruction: system_instruction.into(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn gate(&self) -> &MessageGate {
        &self.gate
    }

    /// Runs the whole pipeline for one message.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id, message_id = %message.id))]
    pub async fn on_message(&self, message: &Message) -> Outcome {
        if !self.gate.should_process(message) {
            info!("Message not addressed to bot, ignoring");
            return Outcome::Ignored;
        }

        let conversation_id = message.conversation_id();
        info!(conversation_id = %conversation_id, "step: loading history");
        let history = match self.memory.load_history(&conversation_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(conversation_id = %conversation_id, error = %e, "Memory unavailable, continuing with empty history");
                Vec::new()
            }
        };

        let text = self.gate.extract_text(message);
        let plan = match prompt::assemble(&self.system_instruction, history, &text) {
            Ok(plan) => plan,
            Err(e) => {
                error!(conversation_id = %conversation_id, error = %e, "Nothing to answer");
                return Outcome::Failed(e.into());
            }
        };
        info!(conversation_id = %conversation_id, turns = plan.len(), "step: prompt assembled");

        let reply = match self.invoker.complete(&plan).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(conversation_id = %conversation_id, error = %e, "Completion failed, memory unchanged");
                self.notify_failure(message).await;
                return Outcome::Failed(e.into());
            }
        };

        for turn in [plan.new_user_turn, ChatMessage::assistant(reply.clone())] {
            if let Err(e) = self.memory.append_turn(&conversation_id, turn).await {
                error!(conversation_id = %conversation_id, error = %e, "Failed to record turn");
            }
        }

        if let Err(e) = self.bot.reply_to(message, &reply).await {
            error!(conversation_id = %conversation_id, error = %e, "Failed to deliver reply");
        } else {
            info!(conversation_id = %conversation_id, reply_len = reply.len(), "step: reply sent");
        }
        Outcome::Replied(reply)
    }

    async fn notify_failure(&self, message: &Message) {
        if let FailurePolicy::Notice(notice) = &self.failure_policy {
            if let Err(e) = self.bot.reply_to(message, notice).await {
                error!(error = %e, "Failed to send failure notice");
            }
        }
    }
}
