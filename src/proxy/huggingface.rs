//! Hugging Face Inference API client
//!
//! Posts `{inputs, parameters}` to a text-generation model endpoint.

use async_trait::async_trait;
use tracing::{debug, error};

use super::{
    headers::{build_default_headers, content_type},
    provider::InferenceProvider,
    upstream::{GenerationRequest, UpstreamReply},
};
use crate::{config::Config, error::AppResult};

/// Hugging Face Inference API client
pub struct HuggingFaceClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HuggingFaceClient {
    /// Create a new client; the timeout lives on the shared `reqwest::Client`
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: config.inference_api_url.clone(),
            api_key: config.inference_api_key.clone(),
        }
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceClient {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<UpstreamReply> {
        let response = self
            .client
            .post(&self.url)
            .headers(build_default_headers(self.api_key.as_deref())?)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, error = %e, "Failed to send request to provider");
                e
            })?;

        let status = response.status();
        let content_type = content_type(response.headers());
        let body = response.bytes().await?;

        debug!(
            url = %self.url,
            status = %status,
            body_len = body.len(),
            "Received response from provider"
        );

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }
}
