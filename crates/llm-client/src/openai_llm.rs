//! [`LlmClient`] over `openai-client`. Messages are forwarded as given; the caller owns the
//! system instruction.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::CompletionOptions;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    options: CompletionOptions,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            options: CompletionOptions::new(DEFAULT_MODEL),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            options: CompletionOptions::new(DEFAULT_MODEL),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.options.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        self.client
            .chat_completion(&self.options, openai_messages)
            .await
    }
}
