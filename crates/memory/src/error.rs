//! Error type for memory stores.

use thiserror::Error;

/// Errors surfaced by a [`MemoryStore`](crate::MemoryStore).
///
/// Callers treat [`MemoryError::Unavailable`] as "no history" rather than aborting the request.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Memory unavailable: {0}")]
    Unavailable(String),

    /// The summarizer failed; the raw turns are still buffered.
    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Memory config error: {0}")]
    Config(String),
}
