//! Prompt construction and answer extraction
//!
//! The model is a plain text-generation endpoint, so the conversation is
//! flattened into one block ending with an `Assistant:` cue and the answer is
//! whatever the model writes after that cue.

use super::types::ChatTurn;

/// Persona line opening every prompt
pub const PREAMBLE: &str = "You are Gensyn AI — a helpful assistant.";

/// Cue the generation continues from
pub const ASSISTANT_MARKER: &str = "Assistant:";

/// Render prior turns as `"User: ..."` / `"Assistant: ..."` lines
pub fn render_transcript(history: &[ChatTurn]) -> String {
    history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compose the outbound prompt: preamble, transcript, then the question cue
pub fn build_prompt(history: &[ChatTurn], question: &str) -> String {
    format!(
        "{}\n{}\nUser: {}\n{}",
        PREAMBLE,
        render_transcript(history),
        question,
        ASSISTANT_MARKER
    )
}

/// Extract the answer from generated text.
///
/// Text-generation endpoints usually echo the prompt. When the generation
/// starts with the exact prompt, that prefix is dropped; otherwise everything
/// up to and including the first `Assistant:` marker is dropped. Without a
/// marker the whole text is the answer.
pub fn strip_marker(prompt: &str, generated: &str) -> String {
    let answer = match generated.strip_prefix(prompt) {
        Some(rest) => rest,
        None => match generated.find(ASSISTANT_MARKER) {
            Some(idx) => &generated[idx + ASSISTANT_MARKER.len()..],
            None => generated,
        },
    };

    answer.trim().to_string()
}
