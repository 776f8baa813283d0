//! Progressive summarization: the previous summary plus new lines become the next summary.

use async_trait::async_trait;
use prompt::{format_transcript, ChatMessage};

/// Prompt for one summarization step. `{summary}` and `{new_lines}` are substituted.
pub const SUMMARY_PROMPT: &str = "Progressively summarize the lines of conversation provided, adding onto the previous summary and returning a new summary. Keep names, facts, and open questions the assistant may need later. Reply with the summary only.\n\nCurrent summary:\n{summary}\n\nNew lines of conversation:\n{new_lines}\n\nNew summary:";

/// Folds turns into a running summary. Implemented over an LLM by `llm-client`.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        previous_summary: Option<&str>,
        new_turns: &[ChatMessage],
    ) -> anyhow::Result<String>;
}

/// Fills [`SUMMARY_PROMPT`] with the previous summary (or an empty one) and the new turns as a transcript.
pub fn build_summary_prompt(previous_summary: Option<&str>, new_turns: &[ChatMessage]) -> String {
    SUMMARY_PROMPT
        .replace("{summary}", previous_summary.unwrap_or(""))
        .replace("{new_lines}", &format_transcript(new_turns))
}
