//! REPL runner: converts teloxide messages to core::Message and hands them to the dispatcher.

use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument};

use super::adapters::TelegramMessageWrapper;
use crate::core::ToCoreMessage;
use crate::dispatcher::ConversationDispatcher;
use crate::gate::BotIdentity;

/// Resolves the bot's own id and username with `getMe`.
pub async fn resolve_identity(bot: &teloxide::Bot) -> Result<BotIdentity> {
    let me = bot.get_me().await.context("getMe failed")?;
    let username = me.user.username.clone().unwrap_or_default();
    info!(bot_id = me.user.id.0, username = %username, "Resolved bot identity");
    Ok(BotIdentity::new(me.user.id.0 as i64, username))
}

/// Starts the REPL. Each message is converted to core::Message and dispatched; the REPL
/// handler returns immediately and the conversation worker does the rest.
#[instrument(skip(bot, dispatcher))]
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Arc<ConversationDispatcher>) -> Result<()> {
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let dispatcher = dispatcher.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            if core_msg.content.is_empty() {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Received non-text message"
                );
                return respond(());
            }

            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_content = %core_msg.content,
                "Received message"
            );
            dispatcher.dispatch(core_msg);

            respond(())
        }
    })
    .await;

    Ok(())
}
