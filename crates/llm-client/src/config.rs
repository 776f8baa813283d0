//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use prompt::DEFAULT_SYSTEM_MESSAGE;
use std::env;
use std::time::Duration;

use crate::invoker::DEFAULT_TIMEOUT;
use crate::openai_llm::DEFAULT_MODEL;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn timeout(&self) -> Duration;
    fn system_prompt(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_timeout: Duration,
    pub llm_system_prompt: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn temperature(&self) -> f32 {
        self.llm_temperature
    }
    fn timeout(&self) -> Duration {
        self.llm_timeout
    }
    fn system_prompt(&self) -> &str {
        &self.llm_system_prompt
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_temperature = match env::var("LLM_TEMPERATURE") {
            Ok(s) => s
                .trim()
                .parse::<f32>()
                .with_context(|| format!("LLM_TEMPERATURE is not a number: {s}"))?,
            Err(_) => 0.0,
        };
        let llm_timeout = match env::var("LLM_TIMEOUT_SECS") {
            Ok(s) => {
                let secs = s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("LLM_TIMEOUT_SECS is not a number: {s}"))?;
                if secs == 0 {
                    anyhow::bail!("LLM_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_TIMEOUT,
        };
        let llm_system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .or_else(|_| env::var("SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_temperature,
            llm_timeout,
            llm_system_prompt,
        })
    }
}
