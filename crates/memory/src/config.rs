//! Memory configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

use crate::types::MemoryStrategy;

/// Turns buffered before the oldest are folded into the summary.
pub const DEFAULT_SUMMARY_THRESHOLD: usize = 6;

/// Model used for summarization when `SUMMARY_MODEL` is unset.
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-3.5-turbo";

/// Memory strategy configuration interface.
pub trait MemoryConfig: Send + Sync {
    fn strategy(&self) -> MemoryStrategy;
    fn summary_model(&self) -> &str;
}

/// Memory config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvMemoryConfig {
    pub memory_strategy: MemoryStrategy,
    pub memory_summary_model: String,
}

impl MemoryConfig for EnvMemoryConfig {
    fn strategy(&self) -> MemoryStrategy {
        self.memory_strategy
    }
    fn summary_model(&self) -> &str {
        &self.memory_summary_model
    }
}

impl EnvMemoryConfig {
    /// Load from environment variables. An unknown strategy or a bad threshold is an error.
    pub fn from_env() -> Result<Self> {
        let name = env::var("MEMORY_STRATEGY").unwrap_or_else(|_| "verbatim".to_string());
        let threshold = match env::var("MEMORY_SUMMARY_THRESHOLD") {
            Ok(s) => s
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MEMORY_SUMMARY_THRESHOLD is not a number: {s}"))?,
            Err(_) => DEFAULT_SUMMARY_THRESHOLD,
        };
        let memory_strategy = MemoryStrategy::parse(&name, threshold)?;
        let memory_summary_model = env::var("SUMMARY_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string());
        Ok(Self {
            memory_strategy,
            memory_summary_model,
        })
    }
}
