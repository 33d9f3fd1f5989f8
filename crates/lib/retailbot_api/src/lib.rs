//! # retailbot_api
//!
//! HTTP API library for RetailBot.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use retailbot_core::generator::ResponseGenerator;
use retailbot_core::history::HistoryStore;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health, history, metrics};

/// Service name reported by the health and banner endpoints.
pub const SERVICE_NAME: &str = "retailbot-api";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat history store (in-memory or Postgres).
    pub store: Arc<HistoryStore>,
    /// AI-call-with-fallback response pipeline.
    pub generator: Arc<ResponseGenerator>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `retailbot_core::migrate::migrate()` which owns the migration
/// files.
pub async fn migrate(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    retailbot_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/chat", post(chat::chat_handler))
        .route("/api/chat/history/{user_id}", get(history::history_handler))
        .route("/api/user/{user_id}/stats", get(history::stats_handler))
        .route("/api/metrics", get(metrics::metrics_handler))
        .layer(cors)
        .with_state(state)
}
