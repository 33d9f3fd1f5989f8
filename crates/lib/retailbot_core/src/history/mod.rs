//! Chat history storage — in-memory bounded log or PostgreSQL tables.
//!
//! The store is built once at startup and shared behind an `Arc`; which
//! backend you get depends on whether a database URL was configured.
//! Persistence is best-effort: Postgres failures are logged and the caller
//! receives an empty or absent result, never an error.

pub mod memory;
pub mod queries;

use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::{ChatExchange, ChatMetrics, NewExchange, UserAnalytics};
use self::memory::MemoryHistory;

/// Append-only store of chat exchanges with per-user lookups.
pub enum HistoryStore {
    /// Bounded in-memory log for deployments without a database.
    Memory(RwLock<MemoryHistory>),
    /// PostgreSQL-backed log plus incrementally maintained analytics.
    Postgres(PgPool),
}

impl HistoryStore {
    pub fn in_memory() -> Self {
        Self::Memory(RwLock::new(MemoryHistory::new()))
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::Postgres(pool)
    }

    /// Whether exchanges survive a restart.
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Postgres(_))
    }

    /// Database connectivity probe, reported by `/health`.
    pub async fn ping(&self) -> bool {
        match self {
            Self::Memory(_) => false,
            Self::Postgres(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
        }
    }

    /// Append one exchange. Best-effort in Postgres mode: a failed insert is
    /// logged and dropped.
    pub async fn append(&self, new: NewExchange) {
        match self {
            Self::Memory(log) => {
                log.write().await.append(new);
            }
            Self::Postgres(pool) => {
                if let Err(e) = queries::insert_exchange(pool, &new).await {
                    warn!(user_id = %new.user_id, "failed to store exchange: {e}");
                    return;
                }
                if let Err(e) = queries::upsert_analytics(pool, &new).await {
                    warn!(user_id = %new.user_id, "failed to update analytics: {e}");
                }
            }
        }
    }

    /// The last `limit` exchanges for a user, in chronological order.
    pub async fn recent(&self, user_id: &str, limit: usize) -> Vec<ChatExchange> {
        match self {
            Self::Memory(log) => log.read().await.recent(user_id, limit),
            Self::Postgres(pool) => {
                match queries::recent_exchanges(pool, user_id, limit as i64).await {
                    Ok(mut rows) => {
                        rows.reverse();
                        rows
                    }
                    Err(e) => {
                        warn!(user_id, "history lookup failed: {e}");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Per-user analytics; `None` when the user has never chatted.
    pub async fn stats(&self, user_id: &str) -> Option<UserAnalytics> {
        match self {
            Self::Memory(log) => log.read().await.stats(user_id),
            Self::Postgres(pool) => match queries::user_stats(pool, user_id).await {
                Ok(row) => row,
                Err(e) => {
                    warn!(user_id, "stats lookup failed: {e}");
                    None
                }
            },
        }
    }

    /// Aggregates over all stored exchanges; zeroed when the query fails.
    pub async fn metrics(&self) -> ChatMetrics {
        match self {
            Self::Memory(log) => log.read().await.metrics(),
            Self::Postgres(pool) => match queries::aggregate_metrics(pool).await {
                Ok(m) => m,
                Err(e) => {
                    warn!("metrics query failed: {e}");
                    ChatMetrics::default()
                }
            },
        }
    }
}
