//! Hand-written [`LlmClient`] double for llm-client integration tests.

use anyhow::Result;
use async_trait::async_trait;
use llm_client::LlmClient;
use prompt::ChatMessage;
use std::sync::Mutex;
use std::time::Duration;

pub enum MockReply {
    Text(String),
    Error(anyhow::Error),
    Slow(Duration, String),
}

/// Returns queued replies in order and records every request.
pub struct MockLlmClient {
    replies: Mutex<Vec<MockReply>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text(reply: &str) -> Self {
        Self::new(vec![MockReply::Text(reply.to_string())])
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.requests.lock().unwrap().push(messages);
        let next = {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                None
            } else {
                Some(replies.remove(0))
            }
        };
        match next {
            Some(MockReply::Text(t)) => Ok(t),
            Some(MockReply::Error(e)) => Err(e),
            Some(MockReply::Slow(delay, t)) => {
                tokio::time::sleep(delay).await;
                Ok(t)
            }
            None => anyhow::bail!("no reply queued"),
        }
    }
}
