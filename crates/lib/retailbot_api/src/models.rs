//! Wire models for the HTTP API.

use chrono::{DateTime, Utc};
use retailbot_core::models::{ChatExchange, ChatMetrics, UserAnalytics};
use serde::{Deserialize, Serialize};

/// `POST /api/chat` request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    pub session_id: Option<String>,
}

/// `POST /api/chat` response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub ai_powered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// `GET /health` response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub ai_enabled: bool,
    pub database_connected: bool,
}

/// `GET /ready` response body.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// One row of `GET /api/chat/history/{user_id}`.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub message: String,
    pub response: String,
    pub confidence: f64,
    pub ai_powered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ChatExchange> for HistoryEntry {
    fn from(e: ChatExchange) -> Self {
        Self {
            id: e.id,
            message: e.message,
            response: e.response,
            confidence: e.confidence,
            ai_powered: e.ai_powered,
            created_at: e.created_at,
        }
    }
}

/// `GET /api/user/{user_id}/stats` response body.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_messages: i64,
    pub total_ai_messages: i64,
    pub avg_confidence: f64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl From<UserAnalytics> for StatsResponse {
    fn from(a: UserAnalytics) -> Self {
        Self {
            total_messages: a.total_messages,
            total_ai_messages: a.total_ai_messages,
            avg_confidence: a.avg_confidence,
            first_seen: a.first_seen,
            last_seen: a.last_seen,
        }
    }
}

/// `GET /api/metrics` response body.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub total_messages: i64,
    pub distinct_users: i64,
    pub ai_messages: i64,
    pub ai_percentage: f64,
    pub avg_ai_confidence: f64,
}

impl From<ChatMetrics> for MetricsResponse {
    fn from(m: ChatMetrics) -> Self {
        Self {
            total_messages: m.total_messages,
            distinct_users: m.distinct_users,
            ai_messages: m.ai_messages,
            ai_percentage: m.ai_percentage,
            avg_ai_confidence: m.avg_ai_confidence,
        }
    }
}

/// `GET /` service banner.
#[derive(Debug, Serialize)]
pub struct ServiceBanner {
    pub service: &'static str,
    pub version: &'static str,
    pub message: &'static str,
    pub health: &'static str,
    pub metrics: &'static str,
}

/// Error body shared by all failure responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
