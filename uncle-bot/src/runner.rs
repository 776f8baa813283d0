//! Process entry: logging, components, identity, REPL.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::components::{build_bot_components, build_orchestrator};
use crate::config::{AppExtensions, BotConfig};
use crate::core::init_tracing;
use crate::dispatcher::ConversationDispatcher;
use crate::telegram::{resolve_identity, run_repl};
use llm_client::LlmConfig;
use memory::MemoryConfig;

/// Main entry: validate config, init logging, build components, resolve the bot identity,
/// then run the REPL until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        environment = %config.environment(),
        model = %config.extensions().llm_config().model(),
        memory_strategy = %config.extensions().memory_config().strategy(),
        "Initializing bot"
    );

    let components = build_bot_components(&config)?;
    let identity = resolve_identity(&components.teloxide_bot).await.map_err(|e| {
        error!(error = %e, "Could not resolve bot identity");
        e
    })?;
    if identity.username.is_empty() {
        error!("Bot has no username; only replies and text mentions will address it");
    }

    let orchestrator = Arc::new(build_orchestrator(&config, &components, identity));
    let dispatcher = Arc::new(ConversationDispatcher::new(orchestrator));

    info!("Bot started successfully");

    run_repl(components.teloxide_bot.clone(), dispatcher).await
}
