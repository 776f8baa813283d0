//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation, plus the two callers built on
//! top of it: [`CompletionInvoker`] (answers a [`prompt::PromptPlan`]) and [`LlmSummarizer`]
//! (folds old turns for the `memory` crate). Transport-agnostic.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

pub mod config;
mod invoker;
mod openai_llm;
mod summarizer;

pub use config::{EnvLlmConfig, LlmConfig};
pub use invoker::{CompletionError, CompletionInvoker, DEFAULT_TIMEOUT};
pub use openai_llm::OpenAILlmClient;
pub use summarizer::LlmSummarizer;

/// LLM client interface: one completion for an ordered list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages, sent exactly as ordered.
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
