//! Aggregate metrics handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::MetricsResponse;

/// `GET /api/metrics` — aggregates over all stored exchanges.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(state.store.metrics().await.into())
}
