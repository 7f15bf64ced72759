//! Chat endpoint
//!
//! Accepts a question plus prior turns from the widget, asks the
//! text-generation provider once and returns `{answer}` or a JSON error.

use std::sync::Arc;

use axum::{
    extract::{rejection::BytesRejection, State},
    http::{Method, Uri},
    Json,
};
use bytes::Bytes;
use tracing::Instrument;

use crate::{
    chat::{build_prompt, strip_marker, ChatAnswer, ChatRequest},
    error::{AppError, AppResult},
    proxy::{GenerationRequest, RequestContext},
    routes::metrics::{record_request, record_upstream_status},
    AppState,
};

/// Handle a chat question
///
/// Mounted for every method so that non-POST requests still get the JSON
/// error body rather than the router's empty 405.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated answer", body = ChatAnswer),
        (status = 400, description = "Missing question", body = crate::error::ErrorResponse),
        (status = 405, description = "Method not allowed", body = crate::error::ErrorResponse),
        (status = 413, description = "Request body too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Server error", body = crate::error::ErrorResponse),
        (status = "default", description = "AI service error, provider status forwarded", body = crate::error::ErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<ChatAnswer>> {
    let mut ctx = RequestContext::new(state.inference_provider.name(), uri.path());
    let span = ctx.create_span();

    let result = answer_question(&state, &mut ctx, &method, body)
        .instrument(span)
        .await;

    let duration = ctx.elapsed_secs();
    match &result {
        Ok(answer) => {
            record_request("success", duration);
            ctx.log_request_complete(answer.answer.len());
        }
        Err(e) => {
            record_request(e.outcome(), duration);
            match e {
                AppError::MethodNotAllowed
                | AppError::MissingQuestion
                | AppError::InvalidBody(_) => ctx.log_rejected(&e.to_string()),
                _ => ctx.log_error(&e.to_string()),
            }
        }
    }

    result.map(Json)
}

/// Validate, build the prompt, call the provider once and extract the answer
async fn answer_question(
    state: &AppState,
    ctx: &mut RequestContext,
    method: &Method,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<ChatAnswer> {
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body = body?;
    let request = ChatRequest::from_slice(&body)?;
    ctx.history_turns = request.session_history.len();
    ctx.log_request_start(request.question.len());

    let prompt = build_prompt(&request.session_history, &request.question);
    ctx.log_upstream_request(state.inference_provider.endpoint(), prompt.len());

    let reply = state
        .inference_provider
        .generate(&GenerationRequest::new(prompt.as_str()))
        .await?;

    ctx.log_upstream_response(
        reply.status.as_u16(),
        reply.content_type.as_deref(),
        reply.body.len(),
    );
    record_upstream_status(reply.status.as_u16());

    let generated = reply.into_body()?.into_generated_text();

    Ok(ChatAnswer {
        answer: strip_marker(&prompt, &generated),
    })
}
