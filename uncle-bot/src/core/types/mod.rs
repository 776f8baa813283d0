//! Core types: user, chat, message, and the transport conversion traits.

mod chat;
mod message;
mod user;

pub use chat::Chat;
pub use message::{Mention, Message};
pub use user::User;

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}
