//! App extensions trait and default implementation (LLM, memory, failure notice).
//! LLM and memory configs are implemented in llm-client and memory.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};
use memory::{EnvMemoryConfig, MemoryConfig};
use std::env;

use crate::orchestrator::{FailurePolicy, DEFAULT_FAILURE_NOTICE};

/// Application extension config. Implement this trait to inject custom config.
pub trait AppExtensions: Send + Sync {
    fn llm_config(&self) -> &dyn LlmConfig;
    fn memory_config(&self) -> &dyn MemoryConfig;
    /// What to tell the user when a completion fails.
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::default()
    }
}

/// Base extensions loaded from env: LLM + memory + FAILURE_NOTICE.
pub struct BaseAppExtensions {
    pub llm: EnvLlmConfig,
    pub memory: EnvMemoryConfig,
    /// None means stay silent on failure.
    pub failure_notice: Option<String>,
}

impl AppExtensions for BaseAppExtensions {
    fn llm_config(&self) -> &dyn LlmConfig {
        &self.llm
    }
    fn memory_config(&self) -> &dyn MemoryConfig {
        &self.memory
    }
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::from_notice(self.failure_notice.as_deref())
    }
}

impl BaseAppExtensions {
    /// Load from environment variables. FAILURE_NOTICE unset uses the default notice; set but
    /// empty means silent.
    pub fn from_env() -> Result<Self> {
        let llm = EnvLlmConfig::from_env()?;
        let memory = EnvMemoryConfig::from_env()?;
        let failure_notice = match env::var("FAILURE_NOTICE") {
            Ok(s) if s.trim().is_empty() => None,
            Ok(s) => Some(s),
            Err(_) => Some(DEFAULT_FAILURE_NOTICE.to_string()),
        };
        Ok(Self {
            llm,
            memory,
            failure_notice,
        })
    }
}
