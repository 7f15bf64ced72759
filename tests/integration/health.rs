//! Health endpoint integration tests
//!
//! Tests for the health check endpoints:
//! - GET /health - Full health check with upstream configuration status
//! - GET /health/ready - Readiness probe
//! - GET /health/live - Liveness probe

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{server_for, test_config, ChatTestHarness};

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let harness = ChatTestHarness::new().await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();

    let json: Value = response.json();

    // Verify response structure
    assert!(json.get("status").is_some(), "Response should have 'status' field");
    assert!(json.get("version").is_some(), "Response should have 'version' field");
    assert!(json.get("uptime_seconds").is_some(), "Response should have 'uptime_seconds' field");
    assert!(json.get("timestamp").is_some(), "Response should have 'timestamp' field");
    assert!(json.get("checks").is_some(), "Response should have 'checks' field");
    assert!(json.get("stats").is_some(), "Response should have 'stats' field");

    assert_eq!(json["status"], "healthy");

    let upstream = &json["checks"]["upstream"];
    assert_eq!(upstream["status"], "healthy");
    assert_eq!(upstream["provider"], "huggingface");
    assert_eq!(upstream["endpoint"], harness.inference.model_url().as_str());
    assert_eq!(upstream["credential_configured"], true);
    assert_eq!(upstream["timeout_seconds"], 5);
}

#[tokio::test]
async fn test_health_does_not_call_provider() {
    let harness = ChatTestHarness::new().await;
    harness.inference.expect_no_generation().await;

    harness.server.get("/health").await.assert_status_ok();
    harness.server.get("/health/ready").await.assert_status_ok();

    assert!(harness.inference.generation_requests().await.is_empty());
}

#[tokio::test]
async fn test_missing_credential_is_degraded() {
    let mut config = test_config("http://127.0.0.1:9/models/unused");
    config.inference_api_key = None;
    let server = server_for(config);

    let response = server.get("/health").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["upstream"]["credential_configured"], false);

    let response = server.get("/health/ready").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "degraded");
}

#[tokio::test]
async fn test_health_live_endpoint() {
    let harness = ChatTestHarness::new().await;

    let response = harness.server.get("/health/live").await;

    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_health_endpoint_returns_version_and_timestamp() {
    let harness = ChatTestHarness::new().await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();

    let json: Value = response.json();

    let version = json["version"].as_str().unwrap();
    assert_eq!(version, env!("CARGO_PKG_VERSION"));

    let uptime = json["uptime_seconds"].as_u64().unwrap();
    let stats_uptime = json["stats"]["uptime_seconds"].as_u64().unwrap();
    assert_eq!(uptime, stats_uptime, "Uptime in stats should match top-level uptime");

    // Timestamp should be a valid RFC3339 string
    let timestamp = json["timestamp"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(timestamp);
    assert!(parsed.is_ok(), "Timestamp should be valid RFC3339 format");
}

#[tokio::test]
async fn test_health_endpoints_accept_get_only() {
    let harness = ChatTestHarness::new().await;

    // POST should not be allowed
    let response = harness.server.post("/health").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let response = harness.server.post("/health/ready").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let response = harness.server.post("/health/live").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
