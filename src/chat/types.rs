//! Inbound request and response types for the chat endpoint
//!
//! The widget sends loosely-typed history turns, so deserialization here is
//! tolerant: unknown roles render as the assistant and non-string text is
//! rendered as its JSON form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Speaker of a history turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Any role other than `"user"`, including a missing one
    #[default]
    Assistant,
}

impl Role {
    /// Label used when rendering the transcript
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One prior turn of the conversation, in conversation order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ChatTurn {
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Role,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Only the exact string `"user"` is a user turn
fn deserialize_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value.as_ref().and_then(Value::as_str) {
        Some("user") => Role::User,
        _ => Role::Assistant,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Chat request posted by the widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The new question; must be a non-empty string
    pub question: String,
    /// Prior turns, oldest first
    #[serde(default)]
    pub session_history: Vec<ChatTurn>,
}

impl ChatRequest {
    /// Decode and validate a raw request body.
    ///
    /// Anything that does not yield a non-empty `question` string is
    /// `MissingQuestion`. A falsy `sessionHistory` is empty; a truthy one that
    /// is not an array is a JSON error, which surfaces as a server error.
    pub fn from_slice(body: &[u8]) -> AppResult<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| AppError::MissingQuestion)?;

        let question = value
            .get("question")
            .and_then(Value::as_str)
            .filter(|q| !q.is_empty())
            .ok_or(AppError::MissingQuestion)?
            .to_string();

        let session_history = match value.get("sessionHistory") {
            None => Vec::new(),
            Some(history) if is_falsy(history) => Vec::new(),
            Some(Value::Array(turns)) => turns
                .iter()
                .map(parse_turn)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => Vec::<ChatTurn>::deserialize(other)?,
        };

        Ok(Self {
            question,
            session_history,
        })
    }
}

/// `null`, `false`, `0` and `""` all mean "no history"
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Objects and `null` decode as turns; any other entry has no role or text
fn parse_turn(entry: &Value) -> Result<ChatTurn, serde_json::Error> {
    match entry {
        Value::Object(_) | Value::Null => ChatTurn::deserialize(entry),
        _ => Ok(ChatTurn::assistant("")),
    }
}

/// Successful chat response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ChatAnswer {
    pub answer: String,
}
