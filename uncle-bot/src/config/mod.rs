//! Bot configuration: BaseConfig (Telegram credential + API URL + log) + AppExtensions (LLM, memory, failure notice).

mod base;
mod bot_config;
mod extensions;

#[cfg(test)]
mod tests;

pub use base::{BaseConfig, Environment};
pub use bot_config::BotConfig;
pub use extensions::{AppExtensions, BaseAppExtensions};
