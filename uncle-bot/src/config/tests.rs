//! Config tests.

use crate::config::bot_config::BotConfig;
use crate::config::{AppExtensions, Environment};
use crate::orchestrator::FailurePolicy;
use llm_client::LlmConfig;
use memory::{MemoryConfig, MemoryStrategy};
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: &[&str] = &[
    "BOT_ENVIRONMENT",
    "BOT_TOKEN",
    "DEV_BOT_TOKEN",
    "PROD_BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "MODEL",
    "LLM_TEMPERATURE",
    "LLM_TIMEOUT_SECS",
    "LLM_SYSTEM_PROMPT",
    "SYSTEM_PROMPT",
    "MEMORY_STRATEGY",
    "MEMORY_SUMMARY_THRESHOLD",
    "SUMMARY_MODEL",
    "FAILURE_NOTICE",
];

fn clear_env() {
    for key in VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.environment(), Environment::Dev);
    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/uncle-bot.log");
    let llm = config.extensions().llm_config();
    assert_eq!(llm.model(), "gpt-3.5-turbo");
    assert_eq!(llm.temperature(), 0.0);
    assert_eq!(llm.timeout(), Duration::from_secs(60));
    let mem = config.extensions().memory_config();
    assert_eq!(mem.strategy(), MemoryStrategy::Verbatim);
    assert_eq!(
        config.extensions().failure_policy(),
        FailurePolicy::Notice("Error processing message".to_string())
    );
    clear_env();
}

#[test]
#[serial]
fn test_environment_selects_credential() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("BOT_TOKEN", "fallback");
    env::set_var("DEV_BOT_TOKEN", "dev_token");
    env::set_var("PROD_BOT_TOKEN", "prod_token");

    assert_eq!(BotConfig::load(None).unwrap().bot_token(), "dev_token");

    env::set_var("BOT_ENVIRONMENT", "prod");
    let config = BotConfig::load(None).unwrap();
    assert_eq!(config.environment(), Environment::Prod);
    assert_eq!(config.bot_token(), "prod_token");

    env::remove_var("PROD_BOT_TOKEN");
    assert_eq!(BotConfig::load(None).unwrap().bot_token(), "fallback");

    assert_eq!(
        BotConfig::load(Some("cli_token".to_string())).unwrap().bot_token(),
        "cli_token"
    );
    clear_env();
}

#[test]
#[serial]
fn test_missing_credential_is_error() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "test_key");
    let err = BotConfig::load(None).err().unwrap();
    assert!(err.to_string().contains("DEV_BOT_TOKEN"));

    env::set_var("BOT_TOKEN", "t");
    env::set_var("BOT_ENVIRONMENT", "staging");
    assert!(BotConfig::load(None).is_err());
    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("OPENAI_API_KEY", "custom_key");
    env::set_var("LOG_FILE", "/tmp/uncle.log");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
    env::set_var("MEMORY_STRATEGY", "summarized");
    env::set_var("MEMORY_SUMMARY_THRESHOLD", "4");
    env::set_var("SUMMARY_MODEL", "gpt-4o-mini");
    env::set_var("FAILURE_NOTICE", "");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.log_file(), "/tmp/uncle.log");
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert!(config.validate().is_ok());
    let mem = config.extensions().memory_config();
    assert_eq!(mem.strategy(), MemoryStrategy::Summarized { threshold: 4 });
    assert_eq!(mem.summary_model(), "gpt-4o-mini");
    assert_eq!(config.extensions().failure_policy(), FailurePolicy::Silent);
    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_api_url() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("OPENAI_API_KEY", "k");
    env::set_var("TELEGRAM_API_URL", "not a url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}
