//! OpenAPI specification for the chat API
//!
//! Describes the widget-facing contract: the request shape, the answer and
//! the error body shared by every failure.

use utoipa::OpenApi;

use crate::{
    chat::{ChatAnswer, ChatRequest, ChatTurn, Role},
    error::ErrorResponse,
};

/// OpenAPI specification for the Chat Relay API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat Relay API",
        version = "1.0.0",
        description = "Relays chat widget questions to a hosted text-generation model"
    ),
    paths(
        crate::routes::chat::chat
    ),
    components(
        schemas(
            Role,
            ChatTurn,
            ChatRequest,
            ChatAnswer,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Chat", description = "Chat question endpoint")
    )
)]
pub struct ChatApiDoc;
