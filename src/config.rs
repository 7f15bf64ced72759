//! Configuration management for Chat Relay
//!
//! Configuration is loaded from environment variables once at start-up and
//! is read-only afterwards.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Default text-generation endpoint
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Full URL of the text-generation endpoint
    pub inference_api_url: String,
    /// Bearer credential for the inference provider.
    /// Not validated here: a missing key shows up as an upstream auth failure.
    pub inference_api_key: Option<String>,

    /// Timeout for the single outbound call (in seconds)
    pub upstream_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("RELAY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,

            inference_api_url: env::var("HF_API_URL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string()),
            inference_api_key: env::var("HF_API_KEY").ok().filter(|k| !k.is_empty()),

            upstream_timeout_seconds: env::var("UPSTREAM_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_SECONDS")?,
        })
    }

    /// Outbound call timeout as a `Duration`
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}
