//! Shared test doubles for memory integration tests.

use async_trait::async_trait;
use memory::Summarizer;
use prompt::{format_transcript, ChatMessage};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Summarizer that joins the previous summary and the folded transcript. Can be told to fail.
#[derive(Default)]
pub struct MockSummarizer {
    fail: AtomicBool,
    calls: AtomicUsize,
    inputs: Mutex<Vec<(Option<String>, Vec<ChatMessage>)>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let s = Self::default();
        s.set_failing(true);
        s
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<(Option<String>, Vec<ChatMessage>)> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        previous_summary: Option<&str>,
        new_turns: &[ChatMessage],
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs
            .lock()
            .unwrap()
            .push((previous_summary.map(str::to_string), new_turns.to_vec()));
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("summarizer backend down");
        }
        let transcript = format_transcript(new_turns).replace('\n', " | ");
        Ok(match previous_summary {
            Some(prev) => format!("{prev} | {transcript}"),
            None => transcript,
        })
    }
}
