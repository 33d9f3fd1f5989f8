//! In-memory history backend — a bounded FIFO log of recent exchanges.

use std::collections::{HashSet, VecDeque};

use chrono::Utc;

use crate::models::{ChatExchange, ChatMetrics, NewExchange, UserAnalytics};

/// Maximum number of exchanges retained; the oldest is evicted first.
pub const RETENTION_CAP: usize = 100;

/// Append-only log of chat exchanges, newest at the back.
///
/// Ids are assigned from a monotonic counter so they stay unique across
/// evictions, mirroring the sequence column of the persistent backend.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: VecDeque<ChatExchange>,
    next_id: i64,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(RETENTION_CAP),
            next_id: 1,
        }
    }

    /// Append one exchange, assigning the next id and enforcing the cap.
    pub fn append(&mut self, new: NewExchange) -> ChatExchange {
        let exchange = ChatExchange {
            id: self.next_id,
            user_id: new.user_id,
            message: new.message,
            response: new.response,
            confidence: new.confidence,
            ai_powered: new.ai_powered,
            session_id: new.session_id,
            created_at: Utc::now(),
        };
        self.next_id += 1;

        self.entries.push_back(exchange.clone());
        if self.entries.len() > RETENTION_CAP {
            self.entries.pop_front();
        }
        exchange
    }

    /// The last `limit` exchanges for a user, in chronological order.
    pub fn recent(&self, user_id: &str, limit: usize) -> Vec<ChatExchange> {
        let mut rows: Vec<ChatExchange> = self
            .entries
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .take(limit)
            .cloned()
            .collect();
        rows.reverse();
        rows
    }

    /// Fold the retained exchanges for a user into the analytics shape.
    /// Only reflects what the retention window still holds.
    pub fn stats(&self, user_id: &str) -> Option<UserAnalytics> {
        let mut iter = self.entries.iter().filter(|e| e.user_id == user_id);
        let first = iter.next()?;

        let mut stats = UserAnalytics {
            user_id: user_id.to_string(),
            total_messages: 1,
            total_ai_messages: first.ai_powered as i64,
            avg_confidence: first.confidence,
            first_seen: first.created_at,
            last_seen: first.created_at,
        };
        for e in iter {
            stats.avg_confidence = (stats.avg_confidence * stats.total_messages as f64
                + e.confidence)
                / (stats.total_messages + 1) as f64;
            stats.total_messages += 1;
            stats.total_ai_messages += e.ai_powered as i64;
            stats.last_seen = e.created_at;
        }
        Some(stats)
    }

    /// Aggregate counts over everything currently retained.
    pub fn metrics(&self) -> ChatMetrics {
        let total = self.entries.len() as i64;
        let mut users: HashSet<&str> = HashSet::new();
        let mut ai_messages = 0i64;
        let mut ai_confidence_sum = 0.0f64;

        for e in &self.entries {
            users.insert(e.user_id.as_str());
            if e.ai_powered {
                ai_messages += 1;
                ai_confidence_sum += e.confidence;
            }
        }

        ChatMetrics {
            total_messages: total,
            distinct_users: users.len() as i64,
            ai_messages,
            ai_percentage: if total > 0 {
                ai_messages as f64 * 100.0 / total as f64
            } else {
                0.0
            },
            avg_ai_confidence: if ai_messages > 0 {
                ai_confidence_sum / ai_messages as f64
            } else {
                0.0
            },
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(user_id: &str, message: &str, confidence: f64, ai: bool) -> NewExchange {
        NewExchange {
            user_id: user_id.to_string(),
            message: message.to_string(),
            response: format!("re: {message}"),
            confidence,
            ai_powered: ai,
            session_id: None,
        }
    }

    #[test]
    fn append_then_recent_returns_it() {
        let mut log = MemoryHistory::new();
        log.append(exchange("u1", "hi", 0.75, false));

        let rows = log.recent("u1", 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].message, "hi");
        assert_eq!(rows[0].id, 1);
    }

    #[test]
    fn recent_is_chronological_and_honors_limit() {
        let mut log = MemoryHistory::new();
        for i in 0..5 {
            log.append(exchange("u1", &format!("m{i}"), 0.75, false));
        }
        log.append(exchange("u2", "other", 0.75, false));

        let rows = log.recent("u1", 3);
        let messages: Vec<&str> = rows.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn retention_cap_evicts_oldest_first() {
        let mut log = MemoryHistory::new();
        for i in 0..(RETENTION_CAP + 10) {
            log.append(exchange("u1", &format!("m{i}"), 0.75, false));
        }

        assert_eq!(log.len(), RETENTION_CAP);
        let rows = log.recent("u1", RETENTION_CAP);
        assert_eq!(rows.first().unwrap().message, "m10");
    }

    #[test]
    fn ids_stay_monotonic_across_eviction() {
        let mut log = MemoryHistory::new();
        for i in 0..(RETENTION_CAP + 5) {
            let stored = log.append(exchange("u1", &format!("m{i}"), 0.75, false));
            assert_eq!(stored.id, i as i64 + 1);
        }
    }

    #[test]
    fn stats_unknown_user_is_none() {
        let log = MemoryHistory::new();
        assert!(log.stats("nobody").is_none());
    }

    #[test]
    fn stats_folds_running_average() {
        let mut log = MemoryHistory::new();
        log.append(exchange("u1", "a", 0.75, false));
        log.append(exchange("u1", "b", 0.85, true));

        let stats = log.stats("u1").expect("stats");
        assert_eq!(stats.total_messages, 2);
        assert_eq!(stats.total_ai_messages, 1);
        assert!((stats.avg_confidence - 0.80).abs() < 1e-9);
        assert!(stats.first_seen <= stats.last_seen);
    }

    #[test]
    fn metrics_on_empty_log_are_zeroed() {
        let log = MemoryHistory::new();
        let m = log.metrics();
        assert_eq!(m.total_messages, 0);
        assert_eq!(m.distinct_users, 0);
        assert_eq!(m.ai_percentage, 0.0);
        assert_eq!(m.avg_ai_confidence, 0.0);
    }

    #[test]
    fn metrics_counts_users_and_ai_share() {
        let mut log = MemoryHistory::new();
        log.append(exchange("u1", "a", 0.75, false));
        log.append(exchange("u2", "b", 0.90, true));
        log.append(exchange("u2", "c", 0.80, true));

        let m = log.metrics();
        assert_eq!(m.total_messages, 3);
        assert_eq!(m.distinct_users, 2);
        assert_eq!(m.ai_messages, 2);
        assert!((m.ai_percentage - 200.0 / 3.0).abs() < 1e-9);
        assert!((m.avg_ai_confidence - 0.85).abs() < 1e-9);
    }
}
