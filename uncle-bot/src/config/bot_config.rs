//! BotConfig: BaseConfig + BaseAppExtensions. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseAppExtensions, BaseConfig, Environment};

/// Bot config: BaseConfig + extensions. Use BotConfig::load() for env-based loading.
pub struct BotConfig {
    pub base: BaseConfig,
    pub extensions: BaseAppExtensions,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides every token variable.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let extensions = BaseAppExtensions::from_env()?;
        Ok(Self { base, extensions })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn extensions(&self) -> &BaseAppExtensions {
        &self.extensions
    }

    pub fn environment(&self) -> Environment {
        self.base.environment
    }
    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
