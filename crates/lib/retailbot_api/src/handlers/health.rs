//! Health, readiness, and banner endpoints.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::models::{HealthResponse, ReadyResponse, ServiceBanner};
use crate::{AppState, SERVICE_NAME};

/// `GET /` — service banner with links.
pub async fn root() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        service: SERVICE_NAME,
        version: retailbot_core::version(),
        message: "RetailBot API is running!",
        health: "/health",
        metrics: "/api/metrics",
    })
}

/// `GET /health` — liveness plus a report of which optional collaborators
/// (completion credential, database) are live.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: retailbot_core::version(),
        timestamp: Utc::now(),
        ai_enabled: state.generator.ai_enabled(),
        database_connected: state.store.ping().await,
    })
}

/// `GET /ready` — readiness check.
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready",
        timestamp: Utc::now(),
    })
}
