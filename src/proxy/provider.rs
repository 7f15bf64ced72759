//! Inference provider abstraction layer
//!
//! The handler talks to the text-generation backend only through this trait,
//! so tests can inject a fake provider and deployments can point at any
//! endpoint speaking the same wire format.

use async_trait::async_trait;

use super::upstream::{GenerationRequest, UpstreamReply};
use crate::error::AppResult;

/// Trait defining the interface for text-generation providers
///
/// Implementations perform exactly one outbound call per invocation and
/// return the reply as received, whatever its status. Transport failures
/// (connection refused, timeout) are the only errors.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Get the provider name for logging and metrics
    fn name(&self) -> &'static str;

    /// Endpoint the provider posts to
    fn endpoint(&self) -> &str;

    /// Whether a credential is configured
    fn has_credential(&self) -> bool;

    /// Send one generation request
    async fn generate(&self, request: &GenerationRequest) -> AppResult<UpstreamReply>;
}
