//! Error types for Chat Relay
//!
//! Every failure on the request path is converted into the JSON body callers
//! depend on: `{"error": "...", "detail": "..."}` with `detail` optional.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing question")]
    MissingQuestion,

    /// Request body could not be read, usually because it exceeds the limit
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] BytesRejection),

    /// Non-2xx answer from the inference provider; status and body are forwarded
    #[error("AI service error ({status}): {detail}")]
    Upstream { status: StatusCode, detail: String },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status code returned to the caller
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingQuestion => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::Upstream { status, .. } => *status,
            AppError::HttpError(_) | AppError::JsonError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Metrics label for the request outcome
    pub fn outcome(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed
            | AppError::MissingQuestion
            | AppError::InvalidBody(_) => "rejected",
            AppError::Upstream { .. } => "upstream_error",
            _ => "server_error",
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::MethodNotAllowed => ErrorResponse {
                error: "Method not allowed".to_string(),
                detail: None,
            },
            AppError::MissingQuestion => ErrorResponse {
                error: "Missing question".to_string(),
                detail: None,
            },
            AppError::InvalidBody(rejection) => ErrorResponse {
                error: "Invalid request body".to_string(),
                detail: Some(rejection.body_text()),
            },
            AppError::Upstream { detail, .. } => ErrorResponse {
                error: "AI service error".to_string(),
                detail: Some(detail),
            },
            AppError::HttpError(e) => server_error(e.to_string()),
            AppError::JsonError(e) => server_error(e.to_string()),
            // Alternate formatting keeps the context chain in the detail
            AppError::Internal(e) => server_error(format!("{:#}", e)),
        };

        (status, Json(body)).into_response()
    }
}

fn server_error(detail: String) -> ErrorResponse {
    ErrorResponse {
        error: "Server error".to_string(),
        detail: Some(detail),
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
