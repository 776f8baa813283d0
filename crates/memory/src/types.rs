//! # Core Types
//!
//! ## MemoryStrategy
//!
//! Selects how a conversation is remembered:
//!
//! - `Verbatim`: every turn is stored and replayed unmodified
//! - `Summarized { threshold }`: once more than `threshold` turns are buffered, the oldest
//!   ones are folded into a running summary by a [`Summarizer`](crate::Summarizer)
//!
//! ## MemoryState
//!
//! The per-conversation state owned by [`ConversationMemoryStore`](crate::ConversationMemoryStore).

use prompt::ChatMessage;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MemoryError;

/// Title line of the synthetic turn that carries the running summary.
pub const SUMMARY_PREFIX: &str = "Summary of the conversation so far:";

/// How conversation history is kept between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum MemoryStrategy {
    Verbatim,
    Summarized { threshold: usize },
}

impl MemoryStrategy {
    /// Parses `verbatim` / `summarized` (case-insensitive); `threshold` applies to summarized only.
    pub fn parse(name: &str, threshold: usize) -> Result<Self, MemoryError> {
        match name.trim().to_lowercase().as_str() {
            "verbatim" | "buffer" => Ok(MemoryStrategy::Verbatim),
            "summarized" | "summary" => {
                if threshold == 0 {
                    return Err(MemoryError::Config(
                        "summarization threshold must be at least 1".to_string(),
                    ));
                }
                Ok(MemoryStrategy::Summarized { threshold })
            }
            other => Err(MemoryError::Config(format!(
                "unknown memory strategy: {other} (expected verbatim or summarized)"
            ))),
        }
    }
}

impl fmt::Display for MemoryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryStrategy::Verbatim => write!(f, "verbatim"),
            MemoryStrategy::Summarized { threshold } => write!(f, "summarized(threshold={threshold})"),
        }
    }
}

/// Memory of one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryState {
    Verbatim {
        turns: Vec<ChatMessage>,
    },
    Summarized {
        summary: Option<String>,
        buffer: Vec<ChatMessage>,
    },
}

impl MemoryState {
    pub fn new(strategy: &MemoryStrategy) -> Self {
        match strategy {
            MemoryStrategy::Verbatim => MemoryState::Verbatim { turns: Vec::new() },
            MemoryStrategy::Summarized { .. } => MemoryState::Summarized {
                summary: None,
                buffer: Vec::new(),
            },
        }
    }

    /// History as replayed into the prompt: the summary turn (if any) then the unfolded turns.
    pub fn history(&self) -> Vec<ChatMessage> {
        match self {
            MemoryState::Verbatim { turns } => turns.clone(),
            MemoryState::Summarized { summary, buffer } => {
                let mut out = Vec::with_capacity(buffer.len() + 1);
                if let Some(s) = summary {
                    out.push(ChatMessage::system(format!("{SUMMARY_PREFIX}\n{s}")));
                }
                out.extend(buffer.iter().cloned());
                out
            }
        }
    }

    pub fn push(&mut self, turn: ChatMessage) {
        match self {
            MemoryState::Verbatim { turns } => turns.push(turn),
            MemoryState::Summarized { buffer, .. } => buffer.push(turn),
        }
    }

    /// Number of oldest buffered turns to fold when the buffer is over `threshold`.
    ///
    /// Folding keeps the newest `threshold / 2` turns verbatim.
    pub fn fold_count(&self, threshold: usize) -> Option<usize> {
        match self {
            MemoryState::Summarized { buffer, .. } if buffer.len() > threshold => {
                Some(buffer.len() - threshold / 2)
            }
            _ => None,
        }
    }

    /// Previous summary and the `count` oldest turns, i.e. the summarizer's input.
    pub fn fold_input(&self, count: usize) -> (Option<&str>, &[ChatMessage]) {
        match self {
            MemoryState::Summarized { summary, buffer } => {
                (summary.as_deref(), &buffer[..count.min(buffer.len())])
            }
            MemoryState::Verbatim { .. } => {
                let none: &[ChatMessage] = &[];
                (None, none)
            }
        }
    }

    /// Replaces the summary and drops the `count` oldest turns it now covers.
    pub fn apply_fold(&mut self, count: usize, new_summary: String) {
        if let MemoryState::Summarized { summary, buffer } = self {
            let count = count.min(buffer.len());
            buffer.drain(..count);
            *summary = Some(new_summary);
        }
    }

    /// Turns currently held verbatim.
    pub fn raw_len(&self) -> usize {
        match self {
            MemoryState::Verbatim { turns } => turns.len(),
            MemoryState::Summarized { buffer, .. } => buffer.len(),
        }
    }
}
