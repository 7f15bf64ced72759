//! Chat Relay - backend for a browser chat widget
//!
//! This library turns a widget question plus its prior turns into a single
//! text-generation prompt, forwards it to a hosted model and returns a
//! normalized answer or error.

pub mod chat;
pub mod config;
pub mod docs;
pub mod error;
pub mod proxy;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::proxy::{HuggingFaceClient, InferenceProvider};

/// Application state shared across all request handlers
///
/// Read-only after construction.
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Provider the chat handler forwards prompts to
    pub inference_provider: Arc<dyn InferenceProvider>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling and the outbound timeout
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(config.upstream_timeout())
            .build()?;

        let inference_provider: Arc<dyn InferenceProvider> =
            Arc::new(HuggingFaceClient::new(http_client, &config));

        Ok(Self {
            config,
            start_time: Instant::now(),
            inference_provider,
        })
    }

    /// Create a new application state for testing with an injected provider
    #[cfg(test)]
    pub fn new_for_testing(config: Config, inference_provider: Arc<dyn InferenceProvider>) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            inference_provider,
        }
    }
}
