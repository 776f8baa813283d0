//! # Memory Crate
//!
//! Per-conversation memory for the Uncle bot: every turn replayed verbatim, or a rolling
//! summary of older turns plus the most recent ones.
//!
//! ## Quick Start
//!
//! ```rust
//! use memory::{ConversationMemoryStore, MemoryStore};
//! use prompt::ChatMessage;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let store = ConversationMemoryStore::verbatim();
//!     store.append_turn("42", ChatMessage::user("Hello")).await.unwrap();
//!     assert_eq!(store.load_history("42").await.unwrap().len(), 1);
//! });
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `MemoryStrategy` and `MemoryState`
//! - [`store`] - the `MemoryStore` interface
//! - [`conversation_store`] - in-process store keyed by conversation id
//! - [`summarizer`] - the `Summarizer` interface and its prompt
//! - [`config`] - env-based memory configuration
//!
//! ## External Interactions
//!
//! - **AI models**: summarized mode calls a [`Summarizer`], implemented over the chat
//!   completion backend by `llm-client`.
//! - **Bot runtime**: the orchestrator loads history before each completion and appends
//!   the user and assistant turns after a successful one.

pub mod config;
pub mod conversation_store;
pub mod error;
pub mod store;
pub mod summarizer;
pub mod types;

pub use config::{EnvMemoryConfig, MemoryConfig, DEFAULT_SUMMARY_MODEL, DEFAULT_SUMMARY_THRESHOLD};
pub use conversation_store::ConversationMemoryStore;
pub use error::MemoryError;
pub use store::MemoryStore;
pub use summarizer::{build_summary_prompt, Summarizer, SUMMARY_PROMPT};
pub use types::{MemoryState, MemoryStrategy, SUMMARY_PREFIX};
