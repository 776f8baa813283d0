//! # Uncle bot
//!
//! Telegram relay that answers when addressed: gates inbound messages, queues them per
//! conversation, and runs each through memory, prompt assembly and an LLM completion.
//!
//! Flow: teloxide REPL → [`ConversationDispatcher`] (gate + per-conversation queue) →
//! [`ConversationOrchestrator`] → `memory` → `prompt` → `llm-client` → [`Bot::reply_to`].

pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod gate;
pub mod orchestrator;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, parse_message_id, Bot, BotError, Chat, Mention, Message, Result, ToCoreMessage,
    ToCoreUser, User,
};

pub use telegram::{resolve_identity, run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use components::{build_bot_components, build_orchestrator, create_memory_store, BotComponents};
pub use config::{AppExtensions, BaseAppExtensions, BaseConfig, BotConfig, Environment};
pub use dispatcher::ConversationDispatcher;
pub use gate::{BotIdentity, MessageGate};
pub use orchestrator::{ConversationOrchestrator, FailurePolicy, Outcome, ProcessError, DEFAULT_FAILURE_NOTICE};
pub use runner::run_bot;
