//! Base config: Telegram credential, API URL, logging. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Deployment environment; selects which bot credential is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    /// Env var holding this environment's bot token.
    pub fn token_var(&self) -> &'static str {
        match self {
            Environment::Dev => "DEV_BOT_TOKEN",
            Environment::Prod => "PROD_BOT_TOKEN",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => anyhow::bail!("BOT_ENVIRONMENT must be dev or prod, got: {}", other),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

/// Base config: Telegram-related and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_ENVIRONMENT
    pub environment: Environment,
    /// `--token`, else DEV_BOT_TOKEN / PROD_BOT_TOKEN, else BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides every token variable.
    pub fn load(token: Option<String>) -> Result<Self> {
        let environment = match env::var("BOT_ENVIRONMENT") {
            Ok(s) => s.parse()?,
            Err(_) => Environment::default(),
        };
        let bot_token = match token.filter(|t| !t.trim().is_empty()) {
            Some(t) => t,
            None => non_empty_var(environment.token_var())
                .or_else(|| non_empty_var("BOT_TOKEN"))
                .with_context(|| {
                    format!(
                        "No bot token for environment {}: set {} or BOT_TOKEN, or pass --token",
                        environment,
                        environment.token_var()
                    )
                })?,
        };
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/uncle-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        Ok(Self {
            environment,
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}
