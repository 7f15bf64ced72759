//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/health` - Full health check with upstream configuration status
//! - `/health/ready` - Readiness probe
//! - `/health/live` - Liveness probe
//!
//! The provider is never called from here: every call consumes quota.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Upstream provider check result
#[derive(Debug, Serialize)]
pub struct UpstreamCheck {
    pub status: HealthStatus,
    pub provider: String,
    pub endpoint: String,
    pub credential_configured: bool,
    pub timeout_seconds: u64,
}

/// Dependency checks collection
#[derive(Debug, Serialize)]
pub struct DependencyChecks {
    pub upstream: UpstreamCheck,
}

/// Application statistics
#[derive(Debug, Serialize)]
pub struct HealthStats {
    pub uptime_seconds: u64,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub checks: DependencyChecks,
    pub stats: HealthStats,
}

/// Simple health response for liveness/readiness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// A missing credential degrades the service but requests are still served
fn check_upstream(state: &AppState) -> UpstreamCheck {
    let provider = &state.inference_provider;
    let credential_configured = provider.has_credential();

    UpstreamCheck {
        status: if credential_configured {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        provider: provider.name().to_string(),
        endpoint: provider.endpoint().to_string(),
        credential_configured,
        timeout_seconds: state.config.upstream_timeout_seconds,
    }
}

/// Full health check endpoint
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let upstream_check = check_upstream(&state);
    let overall_status = upstream_check.status.clone();
    let uptime = state.start_time.elapsed().as_secs();

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks: DependencyChecks {
            upstream: upstream_check,
        },
        stats: HealthStats {
            uptime_seconds: uptime,
        },
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe endpoint
///
/// Always 200: the handler can serve without a credential, the status only
/// reports `degraded`.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: check_upstream(&state).status,
        }),
    )
}

/// Liveness probe endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
