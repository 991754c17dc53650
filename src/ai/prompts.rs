//! System prompts and message builders for mood analysis.
//!
//! This module provides the pre-defined prompt and utilities for constructing
//! messages that ask the model for a structured mood analysis of a journal
//! entry.

use super::ollama::Message;

/// System prompt for mood analysis.
///
/// This prompt establishes the AI's role as a mood analyst and pins down the
/// exact JSON shape the reply must take, so the response can be parsed
/// mechanically.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are an empathetic AI that analyzes journal entries. Given a journal entry, you must:

1. Assign a mood score from 1 to 10, where 1 is extremely negative and 10 is extremely positive
2. Identify the dominant emotion, choosing exactly one of: happy, sad, anxious, excited, calm, angry, grateful, stressed, content, melancholy
3. Write a brief, compassionate one-sentence summary of the entry

Respond ONLY with a JSON object in this exact format, with no other text:
{"mood_score": <integer 1-10>, "mood_emotion": "<emotion>", "summary": "<one sentence>"}"#;

/// Builds messages for analyzing a journal entry's mood.
///
/// Creates a conversation that asks the AI to score, label, and summarize
/// the given content.
///
/// # Arguments
///
/// * `content` - The full text of the journal entry
///
/// # Returns
///
/// A vector of messages suitable for chat completion.
pub fn build_analysis_messages(content: &str) -> Vec<Message> {
    vec![
        Message::system(ANALYSIS_SYSTEM_PROMPT),
        Message::user(format!(
            "Analyze this journal entry:\n---\n{}\n---",
            content
        )),
    ]
}
