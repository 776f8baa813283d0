//! [`memory::Summarizer`] backed by an [`LlmClient`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use memory::{build_summary_prompt, Summarizer};
use prompt::ChatMessage;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::invoker::DEFAULT_TIMEOUT;
use crate::LlmClient;

/// Summarizes by asking the model to extend the previous summary with the new turns.
#[derive(Clone)]
pub struct LlmSummarizer {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl LlmSummarizer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(
        &self,
        previous_summary: Option<&str>,
        new_turns: &[ChatMessage],
    ) -> Result<String> {
        let prompt = build_summary_prompt(previous_summary, new_turns);
        info!(turns = new_turns.len(), "step: summarization request");
        let summary = tokio::time::timeout(
            self.timeout,
            self.client
                .get_llm_response_with_messages(vec![ChatMessage::user(prompt)]),
        )
        .await
        .with_context(|| format!("summarization timed out after {:?}", self.timeout))??;
        let summary = summary.trim();
        if summary.is_empty() {
            anyhow::bail!("summarization returned no text");
        }
        Ok(summary.to_string())
    }
}
