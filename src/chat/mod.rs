//! Chat domain
//!
//! Request/response types for the widget contract and the prompt handling
//! that turns a conversation into a single text-generation input.

pub mod prompt;
pub mod types;

pub use prompt::{build_prompt, render_transcript, strip_marker, ASSISTANT_MARKER, PREAMBLE};
pub use types::{ChatAnswer, ChatRequest, ChatTurn, Role};
