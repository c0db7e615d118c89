//! Prometheus Metrics
//!
//! Installs the global recorder and renders it for scraping.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::state::AppState;
use crate::ServerError;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder
///
/// Safe to call more than once; later calls return the first handle.
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| ServerError::Internal(format!("metrics recorder: {}", e)))?;

            metrics::describe_counter!("assistant_queries_total", "Queries processed, by outcome");
            metrics::describe_counter!("assistant_escalations_total", "Conversations handed to a human, by reason");
            metrics::describe_counter!("assistant_backend_fallbacks_total", "Responder misses answered by rules");
            metrics::describe_histogram!("assistant_query_latency_ms", "End-to-end query latency in milliseconds");
            metrics::describe_gauge!("assistant_sessions_active", "Sessions held in memory");

            Ok(handle)
        })
        .cloned()
}

/// Prometheus scrape endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(ref handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
