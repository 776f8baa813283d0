//! In-process [`MemoryStore`] keyed by conversation id.
//!
//! Each conversation gets its own [`MemoryState`], created on first use. The map lock is held
//! only to find or insert a state; summarization runs under the conversation's own lock so one
//! slow fold never blocks other conversations.

use async_trait::async_trait;
use prompt::ChatMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, instrument};

use crate::error::MemoryError;
use crate::store::MemoryStore;
use crate::summarizer::Summarizer;
use crate::types::{MemoryState, MemoryStrategy};

type StateMap = HashMap<String, Arc<Mutex<MemoryState>>>;

/// Process-lifetime memory with one [`MemoryState`] per conversation.
#[derive(Clone)]
pub struct ConversationMemoryStore {
    strategy: MemoryStrategy,
    summarizer: Option<Arc<dyn Summarizer>>,
    conversations: Arc<RwLock<StateMap>>,
}

impl ConversationMemoryStore {
    /// Store that replays every turn unmodified.
    pub fn verbatim() -> Self {
        Self {
            strategy: MemoryStrategy::Verbatim,
            summarizer: None,
            conversations: Arc::new(RwLock::new(StateMap::new())),
        }
    }

    /// Store that folds old turns into a summary once more than `threshold` are buffered.
    pub fn summarized(summarizer: Arc<dyn Summarizer>, threshold: usize) -> Self {
        Self {
            strategy: MemoryStrategy::Summarized {
                threshold: threshold.max(1),
            },
            summarizer: Some(summarizer),
            conversations: Arc::new(RwLock::new(StateMap::new())),
        }
    }

    /// Builds the store for a configured strategy. Summarized mode requires a summarizer.
    pub fn with_strategy(
        strategy: MemoryStrategy,
        summarizer: Option<Arc<dyn Summarizer>>,
    ) -> Result<Self, MemoryError> {
        match (strategy, summarizer) {
            (MemoryStrategy::Verbatim, _) => Ok(Self::verbatim()),
            (MemoryStrategy::Summarized { threshold }, Some(s)) => Ok(Self::summarized(s, threshold)),
            (MemoryStrategy::Summarized { .. }, None) => Err(MemoryError::Config(
                "summarized memory requires a summarizer".to_string(),
            )),
        }
    }

    pub fn strategy(&self) -> MemoryStrategy {
        self.strategy
    }

    /// Number of conversations that have state.
    pub async fn conversation_count(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Forgets one conversation.
    pub async fn clear(&self, conversation_id: &str) {
        self.conversations.write().await.remove(conversation_id);
    }

    async fn existing_state(&self, conversation_id: &str) -> Option<Arc<Mutex<MemoryState>>> {
        self.conversations.read().await.get(conversation_id).cloned()
    }

    async fn state_for(&self, conversation_id: &str) -> Arc<Mutex<MemoryState>> {
        if let Some(state) = self.existing_state(conversation_id).await {
            return state;
        }
        let mut map = self.conversations.write().await;
        map.entry(conversation_id.to_string())
            .or_insert_with(|| {
                info!(conversation_id = %conversation_id, strategy = %self.strategy, "Creating conversation memory");
                Arc::new(Mutex::new(MemoryState::new(&self.strategy)))
            })
            .clone()
    }

    /// Folds the oldest turns when the buffer is over the threshold. On summarizer failure the
    /// raw turns stay buffered and the fold is retried on the next append.
    async fn maybe_fold(&self, conversation_id: &str, state: &mut MemoryState) {
        let (threshold, summarizer) = match (&self.strategy, &self.summarizer) {
            (MemoryStrategy::Summarized { threshold }, Some(s)) => (*threshold, s),
            _ => return,
        };
        let Some(count) = state.fold_count(threshold) else {
            return;
        };

        info!(
            conversation_id = %conversation_id,
            buffered = state.raw_len(),
            folding = count,
            "step: summarizing oldest turns"
        );
        let (previous, turns) = state.fold_input(count);
        match summarizer.summarize(previous, turns).await {
            Ok(summary) => {
                state.apply_fold(count, summary);
                info!(
                    conversation_id = %conversation_id,
                    remaining = state.raw_len(),
                    "step: summary updated"
                );
            }
            Err(e) => {
                let e = MemoryError::Summarization(e.to_string());
                error!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "Keeping raw turns until the next append"
                );
            }
        }
    }
}

#[async_trait]
impl MemoryStore for ConversationMemoryStore {
    #[instrument(skip(self))]
    async fn load_history(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, MemoryError> {
        let Some(state) = self.existing_state(conversation_id).await else {
            info!(conversation_id = %conversation_id, "No memory for conversation yet");
            return Ok(Vec::new());
        };
        let history = state.lock().await.history();
        info!(
            conversation_id = %conversation_id,
            count = history.len(),
            "Loaded conversation history"
        );
        Ok(history)
    }

    #[instrument(skip(self, turn), fields(role = ?turn.role))]
    async fn append_turn(&self, conversation_id: &str, turn: ChatMessage) -> Result<(), MemoryError> {
        let state = self.state_for(conversation_id).await;
        let mut state = state.lock().await;
        state.push(turn);
        self.maybe_fold(conversation_id, &mut state).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_unknown_conversation_is_empty() {
        let store = ConversationMemoryStore::verbatim();
        assert!(store.load_history("nope").await.unwrap().is_empty());
        assert_eq!(store.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn test_clear_forgets_conversation() {
        let store = ConversationMemoryStore::verbatim();
        store.append_turn("c1", ChatMessage::user("hi")).await.unwrap();
        assert_eq!(store.conversation_count().await, 1);
        store.clear("c1").await;
        assert!(store.load_history("c1").await.unwrap().is_empty());
    }

    #[test]
    fn test_with_strategy_requires_summarizer() {
        assert!(ConversationMemoryStore::with_strategy(MemoryStrategy::Verbatim, None).is_ok());
        assert!(ConversationMemoryStore::with_strategy(
            MemoryStrategy::Summarized { threshold: 2 },
            None
        )
        .is_err());
    }
}
