//! Header utilities for provider requests
//!
//! Only the provider credential and the content type are sent upstream;
//! nothing from the widget's request is forwarded.

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::AppResult;

/// Build default headers for provider requests
///
/// Without a credential no `Authorization` header is sent and the provider
/// is left to reject the call.
pub fn build_default_headers(api_key: Option<&str>) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(api_key) = api_key {
        let value = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("Invalid API key format")?;
        headers.insert(AUTHORIZATION, value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}

/// Declared content type of a provider response, if readable
pub fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
