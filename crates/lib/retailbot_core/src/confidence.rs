//! Heuristic confidence scoring.
//!
//! A fixed deterministic formula, not a statistical estimate: a base value
//! plus small bonuses for response length, domain-relevant questions, and
//! actionable phrasing, clamped to a fixed band.

/// Base score for a reply produced by the completion API.
const AI_BASE: f64 = 0.85;

/// Fixed score when no completion credential is configured.
pub const FALLBACK_NO_CREDENTIAL: f64 = 0.75;

/// Fixed score when the completion call failed and the fallback was used.
pub const FALLBACK_AFTER_FAILURE: f64 = 0.70;

/// Bonus applied per matched heuristic.
const BONUS: f64 = 0.05;

/// Responses longer than this earn the length bonus.
const LONG_RESPONSE_BYTES: usize = 200;

/// Lower/upper clamp for AI-path scores.
const MIN_SCORE: f64 = 0.75;
const MAX_SCORE: f64 = 0.95;

const DOMAIN_KEYWORDS: &[&str] = &["inventory", "sales", "customer", "supply", "retail"];

const ADVISORY_MARKERS: &[&str] = &["%", "should", "recommend"];

/// Score an AI-generated response against the originating message.
/// Always lands in [`MIN_SCORE`, `MAX_SCORE`].
pub fn score(response: &str, message: &str) -> f64 {
    let mut confidence = AI_BASE;

    if response.len() > LONG_RESPONSE_BYTES {
        confidence += BONUS;
    }

    let message = message.to_lowercase();
    if DOMAIN_KEYWORDS.iter().any(|k| message.contains(k)) {
        confidence += BONUS;
    }

    let response = response.to_lowercase();
    if ADVISORY_MARKERS.iter().any(|m| response.contains(m)) {
        confidence += BONUS;
    }

    confidence.clamp(MIN_SCORE, MAX_SCORE)
}
