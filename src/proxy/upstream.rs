//! Wire types for the text-generation provider
//!
//! The provider answers with one of several shapes for the same logical
//! field, so the decoded body is classified into [`UpstreamBody`] before the
//! generated text is pulled out.

use axum::http::StatusCode;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Maximum number of tokens the provider may generate
pub const MAX_NEW_TOKENS: u32 = 400;
/// Sampling temperature
pub const TEMPERATURE: f64 = 0.75;
/// Repetition penalty
pub const REPETITION_PENALTY: f64 = 1.08;

/// Fixed generation parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub repetition_penalty: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: MAX_NEW_TOKENS,
            temperature: TEMPERATURE,
            repetition_penalty: REPETITION_PENALTY,
        }
    }
}

/// Outbound request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

impl GenerationRequest {
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: GenerationParameters::default(),
        }
    }
}

/// Raw provider answer as received off the wire
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl UpstreamReply {
    /// Whether the declared content type is JSON
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body according to its content type and classify it.
    ///
    /// Non-2xx statuses become [`AppError::Upstream`] carrying the same
    /// status and the stringified body. A JSON body that fails to decode on
    /// a 2xx reply is an internal error.
    pub fn into_body(self) -> AppResult<UpstreamBody> {
        let decoded = if self.is_json() {
            serde_json::from_slice::<Value>(&self.body)
        } else {
            Ok(Value::String(self.text()))
        };

        if !self.status.is_success() {
            let detail = match decoded {
                Ok(Value::String(text)) => text,
                Ok(value) => value.to_string(),
                Err(_) => self.text(),
            };
            return Err(AppError::Upstream {
                status: self.status,
                detail,
            });
        }

        Ok(UpstreamBody::from_json(decoded?))
    }
}

/// Shapes a successful provider body can take
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    /// `[{"generated_text": "..."}, ...]`, first generation wins
    Batch(String),
    /// `{"generated_text": "..."}`
    Single(String),
    /// Plain text, or a JSON document that is a bare string
    Text(String),
    /// Anything else, e.g. an error payload delivered with a 2xx status
    Unrecognized(Value),
}

impl UpstreamBody {
    /// Classify a decoded body. A `generated_text` only counts when it is
    /// a non-empty string.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => UpstreamBody::Text(text),
            Value::Array(items) => match items.first().and_then(generated_text) {
                Some(text) => UpstreamBody::Batch(text),
                None => UpstreamBody::Unrecognized(Value::Array(items)),
            },
            Value::Object(_) => match generated_text(&value) {
                Some(text) => UpstreamBody::Single(text),
                None => UpstreamBody::Unrecognized(value),
            },
            other => UpstreamBody::Unrecognized(other),
        }
    }

    /// The generated text, falling back to the whole body as compact JSON
    pub fn into_generated_text(self) -> String {
        match self {
            UpstreamBody::Batch(text) | UpstreamBody::Single(text) | UpstreamBody::Text(text) => {
                text
            }
            UpstreamBody::Unrecognized(value) => value.to_string(),
        }
    }
}

fn generated_text(value: &Value) -> Option<String> {
    value
        .get("generated_text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
