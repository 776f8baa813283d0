//! # Prompt
//!
//! Assembles the ordered prompt sent to the chat-completion backend.
//!
//! ## Order
//!
//! - **System**: the static instruction fixed when the orchestrator is built
//! - **History**: conversation turns loaded from memory, oldest first
//! - **User**: the new message that must be answered, always last
//!
//! The backend reads position as priority and recency, so the order is part of the contract.
//!
//! ## External interactions
//!
//! - **AI models**: [`PromptPlan::to_messages`] is converted into an OpenAI `messages` array by `llm-client`.
//! - **Memory**: history turns are [`ChatMessage`] values as stored by the `memory` crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// Label used when a turn is rendered as a transcript line.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::System => "System",
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
        }
    }
}

/// A single conversation turn, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Default system instruction when no custom one is configured.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "The Uncle bot (you) is an intelligent chatbot that engages users in conversations, answers questions, and provides information.";

/// Errors raised while assembling a prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Empty input: the user turn has no text")]
    EmptyInput,
}

/// One fully ordered prompt: system instruction, history, then the new user turn.
///
/// Built fresh for every completion and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPlan {
    pub system_instruction: String,
    pub history: Vec<ChatMessage>,
    pub new_user_turn: ChatMessage,
}

impl PromptPlan {
    /// Returns the turns in send order: system, history (chronological), new user turn.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.len());
        messages.push(ChatMessage::system(self.system_instruction.clone()));
        messages.extend(self.history.iter().cloned());
        messages.push(self.new_user_turn.clone());
        messages
    }

    /// Number of turns [`to_messages`](Self::to_messages) yields.
    pub fn len(&self) -> usize {
        self.history.len() + 2
    }

    /// A plan always carries the system and user turns.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Builds a [`PromptPlan`] from the static instruction, the loaded history, and the new user text.
///
/// # Errors
///
/// [`PromptError::EmptyInput`] when `new_user_text` is empty or whitespace only.
pub fn assemble(
    system_instruction: &str,
    history: Vec<ChatMessage>,
    new_user_text: &str,
) -> Result<PromptPlan, PromptError> {
    if new_user_text.trim().is_empty() {
        return Err(PromptError::EmptyInput);
    }
    Ok(PromptPlan {
        system_instruction: system_instruction.to_string(),
        history,
        new_user_turn: ChatMessage::user(new_user_text),
    })
}

/// Renders turns as `Role: content` lines, one per turn. Used to feed history to the summarizer.
pub fn format_transcript<'a, I>(turns: I) -> String
where
    I: IntoIterator<Item = &'a ChatMessage>,
{
    turns
        .into_iter()
        .map(|t| format!("{}: {}", t.role.label(), t.content))
        .collect::<Vec<_>>()
        .join("\n")
}
