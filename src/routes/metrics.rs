use axum::http::StatusCode;

use crate::services::metrics;

/// GET /metrics: Prometheus scrape endpoint.
pub async fn metrics_handler() -> Result<String, (StatusCode, String)> {
    metrics::render().map_err(|e| {
        tracing::error!("Failed to encode metrics: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}
