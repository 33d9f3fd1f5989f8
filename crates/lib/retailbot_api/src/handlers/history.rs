//! History and per-user stats handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{HistoryEntry, StatsResponse};

/// Default page size for history queries.
const DEFAULT_LIMIT: usize = 50;

/// Largest page a single query may request.
const MAX_LIMIT: usize = 100;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// `GET /api/chat/history/{user_id}` — recent exchanges, chronological.
pub async fn history_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let rows = state.store.recent(&user_id, limit).await;
    Ok(Json(rows.into_iter().map(HistoryEntry::from).collect()))
}

/// `GET /api/user/{user_id}/stats` — per-user analytics; 404 when unknown.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<StatsResponse>> {
    let stats = state
        .store
        .stats(&user_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("no analytics for user '{user_id}'")))?;
    Ok(Json(stats.into()))
}
