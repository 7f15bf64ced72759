//! Documentation endpoint
//!
//! Serves the raw OpenAPI document for the chat API.

use axum::Json;
use utoipa::OpenApi;

use crate::docs::ChatApiDoc;

/// Handler for OpenAPI JSON endpoint
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ChatApiDoc::openapi())
}
