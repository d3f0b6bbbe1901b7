//! Prompt assembly: history truncation, context layout, and size caps

use crate::types::message::{ChatMessage, MessageContent};
use crate::types::request::HistoryTurn;

/// Number of trailing history turns forwarded to the model
const MAX_HISTORY_TURNS: usize = 4;
/// Per-turn history content cap in characters
const MAX_HISTORY_CHARS: usize = 500;
/// Hard cap on the assembled prompt body in characters
const MAX_PROMPT_CHARS: usize = 3500;
/// Cap on document text forwarded for one-shot analysis
const MAX_DOCUMENT_CHARS: usize = 4000;

/// Instruction used for `/rag/ask` when the caller supplies none
pub const DEFAULT_ASK_INSTRUCTION: &str = "Using only the context chunks below, answer the \
     user's question. If the answer is not clearly in the context, say you don't know.";

/// Instruction used for `/analyze/document` when the caller supplies none
pub const DEFAULT_DOCUMENT_INSTRUCTION: &str =
    "Summarize this document and extract key points, entities, and dates.";

/// Instruction used for `/analyze/image` when the caller supplies none
pub const DEFAULT_IMAGE_INSTRUCTION: &str = "Describe this image in detail.";

/// Truncate to at most `max_chars` characters, on a character boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Builds bounded prompts and message lists for the completion endpoint
pub struct PromptBuilder;

impl PromptBuilder {
    /// Convert chat history into model messages.
    ///
    /// Keeps the last [`MAX_HISTORY_TURNS`] turns in order, truncating each
    /// turn's content to [`MAX_HISTORY_CHARS`] characters with an ellipsis
    /// marker. Roles pass through verbatim.
    pub fn history_messages(history: &[HistoryTurn]) -> Vec<ChatMessage> {
        let start = history.len().saturating_sub(MAX_HISTORY_TURNS);
        history[start..]
            .iter()
            .map(|turn| {
                let content = if turn.content.chars().count() > MAX_HISTORY_CHARS {
                    format!("{}...", truncate_chars(&turn.content, MAX_HISTORY_CHARS))
                } else {
                    turn.content.clone()
                };
                ChatMessage {
                    role: turn.role.clone(),
                    content: MessageContent::Text(content),
                }
            })
            .collect()
    }

    /// Assemble the capped prompt body from instruction, context, and question.
    ///
    /// The cap applies to the body only; history messages travel separately.
    pub fn rag_prompt(instruction: &str, context_chunks: &[String], question: &str) -> String {
        let context = context_chunks.join("\n\n");
        let prompt = format!(
            "{instruction}\n\nCONTEXT CHUNKS:\n{context}\n\nUSER QUESTION:\n{question}",
            instruction = instruction,
            context = context,
            question = question
        );

        if prompt.chars().count() > MAX_PROMPT_CHARS {
            format!("{}... [TRUNCATED]", truncate_chars(&prompt, MAX_PROMPT_CHARS))
        } else {
            prompt
        }
    }

    /// Full message list for a RAG question: truncated history, then the body.
    pub fn ask_messages(
        instruction: Option<&str>,
        context_chunks: &[String],
        history: &[HistoryTurn],
        question: &str,
    ) -> Vec<ChatMessage> {
        let instruction = instruction.unwrap_or(DEFAULT_ASK_INSTRUCTION);
        let mut messages = Self::history_messages(history);
        messages.push(ChatMessage::user(Self::rag_prompt(
            instruction,
            context_chunks,
            question,
        )));
        messages
    }

    /// Prompt for one-shot document analysis, body capped at 4000 characters.
    pub fn document_prompt(instruction: &str, text: &str) -> String {
        format!(
            "You are an AI assistant analyzing a document.\n\n\
             USER INSTRUCTION:\n{instruction}\n\n\
             DOCUMENT CONTENT (possibly truncated):\n{body}",
            instruction = instruction,
            body = truncate_chars(text, MAX_DOCUMENT_CHARS)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> HistoryTurn {
        HistoryTurn {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn history_keeps_only_last_four_turns() {
        let history: Vec<HistoryTurn> = (0..10)
            .map(|i| turn(if i % 2 == 0 { "user" } else { "assistant" }, &format!("turn {}", i)))
            .collect();

        let messages = PromptBuilder::history_messages(&history);
        assert_eq!(messages.len(), 4);
        match &messages[0].content {
            MessageContent::Text(text) => assert_eq!(text, "turn 6"),
            _ => panic!("expected text content"),
        }
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[3].role, "assistant");
    }

    #[test]
    fn long_history_turns_are_capped_with_marker() {
        let history = vec![turn("user", &"y".repeat(600))];
        let messages = PromptBuilder::history_messages(&history);
        match &messages[0].content {
            MessageContent::Text(text) => {
                assert_eq!(text.chars().count(), 503);
                assert!(text.ends_with("..."));
            }
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn short_history_turns_pass_through() {
        let history = vec![turn("assistant", "brief")];
        let messages = PromptBuilder::history_messages(&history);
        match &messages[0].content {
            MessageContent::Text(text) => assert_eq!(text, "brief"),
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn prompt_contains_labeled_sections() {
        let chunks = vec!["First chunk.".to_string(), "Second chunk.".to_string()];
        let prompt = PromptBuilder::rag_prompt("Answer carefully.", &chunks, "What is it?");
        assert!(prompt.starts_with("Answer carefully.\n\nCONTEXT CHUNKS:\n"));
        assert!(prompt.contains("First chunk.\n\nSecond chunk."));
        assert!(prompt.ends_with("USER QUESTION:\nWhat is it?"));
    }

    #[test]
    fn oversized_prompt_is_capped() {
        let chunks = vec!["z".repeat(5000)];
        let prompt = PromptBuilder::rag_prompt(DEFAULT_ASK_INSTRUCTION, &chunks, "why?");
        assert!(prompt.ends_with("... [TRUNCATED]"));
        assert_eq!(prompt.chars().count(), 3500 + "... [TRUNCATED]".chars().count());
    }

    #[test]
    fn ask_messages_end_with_prompt_body() {
        let history = vec![turn("user", "earlier question")];
        let chunks = vec!["ctx".to_string()];
        let messages = PromptBuilder::ask_messages(None, &chunks, &history, "now?");

        assert_eq!(messages.len(), 2);
        match &messages[1].content {
            MessageContent::Text(text) => {
                assert!(text.starts_with(DEFAULT_ASK_INSTRUCTION));
                assert!(text.contains("ctx"));
            }
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn document_prompt_truncates_long_documents() {
        let prompt = PromptBuilder::document_prompt("Summarize.", &"d".repeat(10_000));
        let body = prompt.split("DOCUMENT CONTENT (possibly truncated):\n").nth(1).unwrap();
        assert_eq!(body.chars().count(), 4000);
    }
}
