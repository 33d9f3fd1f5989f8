//! Domain models for chat exchanges and aggregates.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Upper bound on `user_id` length, in characters.
pub const MAX_USER_ID_CHARS: usize = 100;

/// Upper bound on `message` length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// One stored question/answer exchange. Immutable once created.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChatExchange {
    pub id: i64,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub confidence: f64,
    pub ai_powered: bool,
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending an exchange; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewExchange {
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub confidence: f64,
    pub ai_powered: bool,
    pub session_id: Option<String>,
}

/// Running per-user aggregates, folded forward on every stored exchange.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserAnalytics {
    pub user_id: String,
    pub total_messages: i64,
    pub total_ai_messages: i64,
    pub avg_confidence: f64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Service-wide aggregates over all stored exchanges.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatMetrics {
    pub total_messages: i64,
    pub distinct_users: i64,
    pub ai_messages: i64,
    pub ai_percentage: f64,
    pub avg_ai_confidence: f64,
}
