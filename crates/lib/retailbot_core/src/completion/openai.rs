//! OpenAI chat-completions client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatTurn, CompletionError};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Request a single completion. One attempt only: any failure here degrades
/// to the deterministic fallback upstream.
pub async fn complete(
    client: &Client,
    api_key: &str,
    model: &str,
    turns: &[ChatTurn],
    max_tokens: u32,
    temperature: f32,
) -> Result<String, CompletionError> {
    let resp = client
        .post(OPENAI_CHAT_URL)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&ChatCompletionRequest {
            model,
            messages: turns,
            max_tokens,
            temperature,
        })
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(CompletionError::Api { status, body });
    }

    let data: ChatCompletionResponse = resp.json().await?;

    data.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or(CompletionError::EmptyResponse)
}
