//! Completion invoker: sends a [`PromptPlan`] to the backend and returns the reply or a tagged failure.

use openai_client::ReplyError;
use prompt::PromptPlan;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::LlmClient;

/// Default bound on one completion call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Why a completion produced no reply. Never carries partial text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend refused: {0}")]
    Refused(String),

    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("Backend returned no text")]
    EmptyReply,
}

impl CompletionError {
    /// Maps a backend error, recovering [`ReplyError`] tags when present.
    pub fn from_backend(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ReplyError>() {
            Some(ReplyError::Refused(reason)) => CompletionError::Refused(reason.clone()),
            Some(ReplyError::Empty) => CompletionError::EmptyReply,
            None => CompletionError::Backend(format!("{err:#}")),
        }
    }
}

/// Sends prompt plans to an injected [`LlmClient`], bounded by a timeout.
#[derive(Clone)]
pub struct CompletionInvoker {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl CompletionInvoker {
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

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends `plan` in order (system, history, user) and returns the reply text.
    #[instrument(skip(self, plan), fields(turns = plan.len()))]
    pub async fn complete(&self, plan: &PromptPlan) -> Result<String, CompletionError> {
        info!(timeout_secs = self.timeout.as_secs(), "step: completion request");
        let call = self.client.get_llm_response_with_messages(plan.to_messages());
        let result = match tokio::time::timeout(self.timeout, call).await {
            Err(_) => Err(CompletionError::Timeout(self.timeout)),
            Ok(Err(e)) => Err(CompletionError::from_backend(&e)),
            Ok(Ok(text)) if text.trim().is_empty() => Err(CompletionError::EmptyReply),
            Ok(Ok(text)) => Ok(text),
        };
        match &result {
            Ok(text) => info!(reply_len = text.len(), "step: completion ok"),
            Err(e) => error!(error = %e, "step: completion failed"),
        }
        result
    }
}
