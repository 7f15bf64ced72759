//! Request logging utilities for provider proxying
//!
//! Provides structured logging with correlation IDs so a single widget
//! question can be followed from arrival to answer.

use std::time::Instant;
use tracing::{debug, error, info, warn, Span};
use uuid::Uuid;

/// Context for tracking a request through the system
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Provider handling this request
    pub provider: String,
    /// Inbound path
    pub endpoint: String,
    /// Number of prior turns sent with the question
    pub history_turns: usize,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(provider: &str, endpoint: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            provider: provider.to_string(),
            endpoint: endpoint.to_string(),
            history_turns: 0,
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Get elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Log request initiation
    pub fn log_request_start(&self, question_len: usize) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            endpoint = %self.endpoint,
            history_turns = %self.history_turns,
            question_len = %question_len,
            "Chat request started"
        );
    }

    /// Log request being sent to upstream
    pub fn log_upstream_request(&self, url: &str, prompt_len: usize) {
        debug!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            url = %url,
            prompt_len = %prompt_len,
            elapsed_ms = %self.elapsed_ms(),
            "Sending request to upstream"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16, content_type: Option<&str>, body_len: usize) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            status = %status,
            content_type = ?content_type,
            body_len = %body_len,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log successful request completion
    pub fn log_request_complete(&self, answer_len: usize) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            endpoint = %self.endpoint,
            answer_len = %answer_len,
            elapsed_ms = %self.elapsed_ms(),
            "Chat request completed"
        );
    }

    /// Log a request rejected before any upstream call
    pub fn log_rejected(&self, reason: &str) {
        warn!(
            trace_id = %self.trace_id,
            endpoint = %self.endpoint,
            reason = %reason,
            "Chat request rejected"
        );
    }

    /// Log request failure
    pub fn log_error(&self, error: &str) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            endpoint = %self.endpoint,
            history_turns = %self.history_turns,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Chat request failed"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "chat_request",
            trace_id = %self.trace_id,
            provider = %self.provider,
            endpoint = %self.endpoint,
        )
    }
}
