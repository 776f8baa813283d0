//! Scripted [`llm_client::LlmClient`] for integration tests.

use anyhow::Result;
use async_trait::async_trait;
use llm_client::LlmClient;
use prompt::ChatMessage;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub enum Scripted {
    Reply(String),
    /// Replies after a delay.
    Delayed(Duration, String),
    Fail(String),
}

/// Returns scripted replies in call order and records every request.
/// With an empty script it echoes the last user turn.
pub struct MockLlmClient {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Scripted::Reply(text.to_string())])
    }

    pub fn echo() -> Self {
        Self::new(Vec::new())
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        self.requests.lock().unwrap().push(messages);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(Scripted::Fail(reason)) => anyhow::bail!(reason),
            None => Ok(format!("echo: {}", last)),
        }
    }
}
