//! HTTP routes for Chat Relay
//!
//! This module defines all HTTP endpoints exposed by the service.

pub mod chat;
pub mod docs;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Largest chat request body accepted, in bytes
pub const MAX_CHAT_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // The widget is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every method reaches the handler, which answers non-POST with a JSON 405
    let chat_routes = Router::new()
        .route("/chat", any(chat::chat))
        .route("/api/chat", any(chat::chat))
        .layer(DefaultBodyLimit::max(MAX_CHAT_BODY_BYTES));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/docs/openapi.json", get(docs::openapi_json));

    Router::new()
        .merge(public_routes)
        .merge(chat_routes)
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
