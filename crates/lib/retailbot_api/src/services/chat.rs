//! Chat service — validation, response selection, best-effort persistence.

use chrono::Utc;
use retailbot_core::generator::ResponseGenerator;
use retailbot_core::history::HistoryStore;
use retailbot_core::models::{MAX_MESSAGE_CHARS, MAX_USER_ID_CHARS, NewExchange};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse};

/// Handle one chat request end to end: validate, generate, record.
pub async fn handle_chat(
    store: &HistoryStore,
    generator: &ResponseGenerator,
    req: ChatRequest,
) -> AppResult<ChatResponse> {
    validate(&req)?;

    let reply = generator.generate(store, &req.user_id, &req.message).await;

    store
        .append(NewExchange {
            user_id: req.user_id.clone(),
            message: req.message,
            response: reply.text.clone(),
            confidence: reply.confidence,
            ai_powered: reply.ai_powered,
            session_id: req.session_id.clone(),
        })
        .await;

    info!(user_id = %req.user_id, ai_powered = reply.ai_powered, "chat reply sent");

    Ok(ChatResponse {
        response: reply.text,
        confidence: reply.confidence,
        timestamp: Utc::now(),
        ai_powered: reply.ai_powered,
        session_id: req.session_id,
    })
}

/// Field-level request validation. A rejected request touches neither the
/// store nor the generator.
fn validate(req: &ChatRequest) -> AppResult<()> {
    let message_chars = req.message.chars().count();
    if message_chars == 0 || message_chars > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "message must be 1-{MAX_MESSAGE_CHARS} characters"
        )));
    }

    let user_id_chars = req.user_id.chars().count();
    if user_id_chars == 0 || user_id_chars > MAX_USER_ID_CHARS {
        return Err(AppError::Validation(format!(
            "user_id must be 1-{MAX_USER_ID_CHARS} characters"
        )));
    }

    Ok(())
}
