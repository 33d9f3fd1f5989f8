//! Chat request handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ChatRequest, ChatResponse};
use crate::services::chat as chat_service;

/// `POST /api/chat` — generate a reply and record the exchange.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let resp = chat_service::handle_chat(&state.store, &state.generator, body).await?;
    Ok(Json(resp))
}
