//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "chat_relay_requests_total",
        "Total number of chat requests by outcome"
    );
    metrics::describe_histogram!(
        "chat_relay_request_duration_seconds",
        "Chat request duration in seconds"
    );
    metrics::describe_counter!(
        "chat_relay_upstream_responses_total",
        "Provider responses by HTTP status"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a finished chat request
pub fn record_request(outcome: &str, duration_secs: f64) {
    metrics::counter!("chat_relay_requests_total", "outcome" => outcome.to_string()).increment(1);
    metrics::histogram!("chat_relay_request_duration_seconds", "outcome" => outcome.to_string())
        .record(duration_secs);
}

/// Record the status of a provider response
pub fn record_upstream_status(status: u16) {
    metrics::counter!("chat_relay_upstream_responses_total", "status" => status.to_string())
        .increment(1);
}
