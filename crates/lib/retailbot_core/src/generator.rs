//! Response generation — credential check, context assembly, completion call,
//! deterministic fallback.
//!
//! Per request: `CHECK_CREDENTIAL → {FALLBACK | CALL_EXTERNAL} → {SUCCESS |
//! CALL_FAILED → FALLBACK}`. No error state leaves this module.

use reqwest::Client;
use tracing::{debug, warn};

use crate::completion::{self, ChatTurn};
use crate::confidence;
use crate::fallback;
use crate::history::HistoryStore;
use crate::models::ChatExchange;

/// System instruction sent ahead of every completion request.
const SYSTEM_PROMPT: &str = "You are RetailBot, an expert AI consultant specializing in retail \
and FMCG (Fast-Moving Consumer Goods) industries. You have deep knowledge in:

- Inventory management and supply chain optimization
- Customer experience and journey mapping
- Sales strategies and revenue optimization
- Market analysis and consumer behavior
- Digital transformation in retail
- Omnichannel strategies
- Data analytics and KPI tracking
- Operational efficiency improvements

Provide specific, actionable advice based on industry best practices. Include relevant \
metrics, percentages, or benchmarks when possible. Keep responses professional, concise \
(2-3 paragraphs max), and focused on practical implementation.";

/// Number of prior exchanges folded into the prompt.
const HISTORY_CONTEXT_LIMIT: usize = 4;

/// Output length bound passed to the completion API.
const MAX_COMPLETION_TOKENS: u32 = 400;

/// Fixed sampling temperature.
const TEMPERATURE: f32 = 0.7;

/// A generated reply plus its provenance.
#[derive(Debug, Clone)]
pub struct GeneratedReply {
    pub text: String,
    pub confidence: f64,
    pub ai_powered: bool,
}

impl GeneratedReply {
    fn fallback(message: &str, confidence: f64) -> Self {
        Self {
            text: fallback::fallback_response(message).to_string(),
            confidence,
            ai_powered: false,
        }
    }
}

/// Orchestrates AI-call-with-fallback response selection.
pub struct ResponseGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl ResponseGenerator {
    /// An empty credential counts as absent.
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model,
        }
    }

    /// Whether an external completion credential is configured.
    pub fn ai_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Produce a reply for `message`. Never fails: an unconfigured or failing
    /// completion API degrades to the keyword fallback.
    pub async fn generate(
        &self,
        store: &HistoryStore,
        user_id: &str,
        message: &str,
    ) -> GeneratedReply {
        let Some(api_key) = self.api_key.as_deref() else {
            return GeneratedReply::fallback(message, confidence::FALLBACK_NO_CREDENTIAL);
        };

        let history = store.recent(user_id, HISTORY_CONTEXT_LIMIT).await;
        let turns = build_turns(&history, message);
        debug!(user_id, turns = turns.len(), "requesting completion");

        match completion::openai::complete(
            &self.client,
            api_key,
            &self.model,
            &turns,
            MAX_COMPLETION_TOKENS,
            TEMPERATURE,
        )
        .await
        {
            Ok(text) => {
                let score = confidence::score(&text, message);
                GeneratedReply {
                    text,
                    confidence: score,
                    ai_powered: true,
                }
            }
            Err(e) => {
                warn!(user_id, "completion call failed, using fallback: {e}");
                GeneratedReply::fallback(message, confidence::FALLBACK_AFTER_FAILURE)
            }
        }
    }
}

/// Prompt layout: system instruction, then history as alternating
/// user/assistant turns in chronological order, then the new message.
fn build_turns(history: &[ChatExchange], message: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() * 2 + 2);
    turns.push(ChatTurn::system(SYSTEM_PROMPT));
    for exchange in history {
        turns.push(ChatTurn::user(exchange.message.clone()));
        turns.push(ChatTurn::assistant(exchange.response.clone()));
    }
    turns.push(ChatTurn::user(message));
    turns
}
