//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for one-shot chat completion.
//! Provides token masking for safe logging and tags refusals and empty replies so callers
//! can tell them apart from transport failures.

use async_openai::types::{CreateChatCompletionRequestArgs, FinishReason};
use async_openai::Client;
use std::sync::Arc;
use thiserror::Error;
use tracing;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11 chars, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= 11 {
        "***".to_string()
    } else {
        let head: String = token.chars().take(7).collect();
        let tail: String = token.chars().skip(len - 4).collect();
        format!("{}***{}", head, tail)
    }
}

/// Reply outcomes that are not transport errors. Returned inside `anyhow::Error`; callers
/// recover the variant with `downcast_ref::<ReplyError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// The model declined (content filter or an explicit refusal message).
    #[error("Model refused: {0}")]
    Refused(String),

    /// The response carried no choice or no text.
    #[error("Model returned an empty reply")]
    Empty,
}

/// Sampling options for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
}

impl CompletionOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// OpenAI chat client. Wraps async-openai client; holds the API key for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    /// API key stored only for logging (masked).
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    fn masked_key(&self) -> String {
        mask_token(&self.api_key_for_logging)
    }

    /// Sends a chat completion request and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// Transport and API errors as-is; [`ReplyError::Refused`] when the choice was filtered or
    /// carries a refusal; [`ReplyError::Empty`] when there is no usable text.
    pub async fn chat_completion(
        &self,
        options: &CompletionOptions,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %options.model,
            temperature = options.temperature,
            message_count = messages.len(),
            api_key = %self.masked_key(),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(options.model.as_str())
            .temperature(options.temperature)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(ReplyError::Empty.into());
        };
        if let Some(refusal) = choice.message.refusal.filter(|r| !r.trim().is_empty()) {
            return Err(ReplyError::Refused(refusal).into());
        }
        if matches!(choice.finish_reason, Some(FinishReason::ContentFilter)) {
            return Err(ReplyError::Refused("content filter".to_string()).into());
        }
        reply_text(choice.message.content)
    }
}

/// Non-blank reply text or [`ReplyError::Empty`].
pub fn reply_text(content: Option<String>) -> anyhow::Result<String> {
    match content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ReplyError::Empty.into()),
    }
}
