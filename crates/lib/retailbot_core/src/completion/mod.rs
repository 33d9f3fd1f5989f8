//! External completion API integration.
//!
//! The outcome of a completion attempt is an explicit `Ok(text) | Err(reason)`
//! value that the response generator pattern-matches on; errors never
//! propagate past that decision point.

pub mod openai;

use serde::Serialize;
use thiserror::Error;

/// One turn of a chat-completion prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

/// Errors from a completion attempt. Exactly one attempt is made per request;
/// nothing in this service retries.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion response had no choices")]
    EmptyResponse,
}
