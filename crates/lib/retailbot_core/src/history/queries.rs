//! Postgres queries for the chat history and analytics tables.

use sqlx::PgPool;

use crate::models::{ChatExchange, ChatMetrics, NewExchange, UserAnalytics};

/// Insert one exchange, returning the assigned row id.
pub async fn insert_exchange(pool: &PgPool, new: &NewExchange) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO chat_exchanges (user_id, message, response, confidence, ai_powered, session_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&new.user_id)
    .bind(&new.message)
    .bind(&new.response)
    .bind(new.confidence)
    .bind(new.ai_powered)
    .bind(&new.session_id)
    .fetch_one(pool)
    .await
}

/// Fold one exchange into `user_analytics` with a single atomic upsert.
/// The running average uses the row's own previous counters, so concurrent
/// appends serialize at the database without application-level locking.
pub async fn upsert_analytics(pool: &PgPool, new: &NewExchange) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_analytics
            (user_id, total_messages, total_ai_messages, avg_confidence, first_seen, last_seen)
        VALUES ($1, 1, $2, $3, now(), now())
        ON CONFLICT (user_id) DO UPDATE SET
            total_messages = user_analytics.total_messages + 1,
            total_ai_messages = user_analytics.total_ai_messages + excluded.total_ai_messages,
            avg_confidence = (user_analytics.avg_confidence * user_analytics.total_messages
                              + excluded.avg_confidence)
                             / (user_analytics.total_messages + 1),
            last_seen = now()
        "#,
    )
    .bind(&new.user_id)
    .bind(new.ai_powered as i64)
    .bind(new.confidence)
    .execute(pool)
    .await?;
    Ok(())
}

/// The last `limit` exchanges for a user, most recent first.
pub async fn recent_exchanges(
    pool: &PgPool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<ChatExchange>, sqlx::Error> {
    sqlx::query_as::<_, ChatExchange>(
        r#"
        SELECT id, user_id, message, response, confidence, ai_powered, session_id, created_at
        FROM chat_exchanges
        WHERE user_id = $1
        ORDER BY id DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Fetch stored analytics for a user.
pub async fn user_stats(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<UserAnalytics>, sqlx::Error> {
    sqlx::query_as::<_, UserAnalytics>(
        r#"
        SELECT user_id, total_messages, total_ai_messages, avg_confidence, first_seen, last_seen
        FROM user_analytics
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Service-wide aggregates over all stored exchanges.
pub async fn aggregate_metrics(pool: &PgPool) -> Result<ChatMetrics, sqlx::Error> {
    let (total, users, ai, avg_ai): (i64, i64, i64, f64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(DISTINCT user_id),
               COUNT(*) FILTER (WHERE ai_powered),
               COALESCE(AVG(confidence) FILTER (WHERE ai_powered), 0.0)
        FROM chat_exchanges
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(ChatMetrics {
        total_messages: total,
        distinct_users: users,
        ai_messages: ai,
        ai_percentage: if total > 0 {
            ai as f64 * 100.0 / total as f64
        } else {
            0.0
        },
        avg_ai_confidence: avg_ai,
    })
}
