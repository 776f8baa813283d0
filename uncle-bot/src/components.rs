//! Component factory: builds the transport, memory and completion pieces from config.

use anyhow::Result;
use llm_client::{CompletionInvoker, LlmClient, LlmConfig, LlmSummarizer, OpenAILlmClient};
use memory::{ConversationMemoryStore, MemoryConfig, MemoryStore, MemoryStrategy, Summarizer};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::config::{AppExtensions, BotConfig};
use crate::core::Bot as CoreBot;
use crate::gate::{BotIdentity, MessageGate};
use crate::orchestrator::ConversationOrchestrator;
use crate::telegram::TelegramBotAdapter;

/// Dependencies the orchestrator is built from, minus the bot identity (resolved at startup).
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: Bot,
    pub bot_adapter: Arc<dyn CoreBot>,
    pub llm_client: Arc<dyn LlmClient>,
    pub memory_store: Arc<dyn MemoryStore>,
}

/// teloxide Bot with the configured token and optional API URL.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token().to_string());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

fn openai_client(llm: &dyn LlmConfig, model: &str) -> OpenAILlmClient {
    OpenAILlmClient::with_base_url(llm.api_key().to_string(), llm.base_url().to_string())
        .with_model(model)
        .with_temperature(llm.temperature())
}

/// Creates the memory store for the configured strategy. Summarized mode gets its own
/// client on `SUMMARY_MODEL`.
#[instrument(skip(config))]
pub fn create_memory_store(config: &BotConfig) -> Result<Arc<dyn MemoryStore>> {
    let llm = config.extensions().llm_config();
    let mem = config.extensions().memory_config();
    let strategy = mem.strategy();

    let summarizer: Option<Arc<dyn Summarizer>> = match strategy {
        MemoryStrategy::Verbatim => None,
        MemoryStrategy::Summarized { threshold } => {
            info!(
                threshold = threshold,
                summary_model = %mem.summary_model(),
                "Using summarized memory"
            );
            let client: Arc<dyn LlmClient> = Arc::new(openai_client(llm, mem.summary_model()));
            Some(Arc::new(LlmSummarizer::new(client).with_timeout(llm.timeout())))
        }
    };
    if summarizer.is_none() {
        info!("Using verbatim memory");
    }

    let store = ConversationMemoryStore::with_strategy(strategy, summarizer)?;
    Ok(Arc::new(store))
}

/// Builds BotComponents from config.
#[instrument(skip(config))]
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config);
    let llm = config.extensions().llm_config();
    let llm_client: Arc<dyn LlmClient> = Arc::new(openai_client(llm, llm.model()));
    let bot_adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let memory_store = create_memory_store(config)?;

    Ok(BotComponents {
        teloxide_bot,
        bot_adapter,
        llm_client,
        memory_store,
    })
}

/// Builds the orchestrator for a resolved identity.
pub fn build_orchestrator(
    config: &BotConfig,
    components: &BotComponents,
    identity: BotIdentity,
) -> ConversationOrchestrator {
    let llm = config.extensions().llm_config();
    let invoker = CompletionInvoker::new(components.llm_client.clone()).with_timeout(llm.timeout());
    ConversationOrchestrator::new(
        MessageGate::new(identity),
        components.memory_store.clone(),
        invoker,
        components.bot_adapter.clone(),
        llm.system_prompt(),
    )
    .with_failure_policy(config.extensions().failure_policy())
}
