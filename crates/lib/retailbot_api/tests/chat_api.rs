//! Integration tests — build the router in memory-only mode (no credential,
//! no database) and drive the full HTTP surface with oneshot requests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use retailbot_api::config::ApiConfig;
use retailbot_api::{AppState, SERVICE_NAME};
use retailbot_core::generator::ResponseGenerator;
use retailbot_core::history::HistoryStore;
use tower::ServiceExt;

fn test_app() -> Router {
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: None,
        openai_api_key: None,
        openai_model: "gpt-3.5-turbo".into(),
        allowed_origins: vec!["http://localhost:3000".into()],
    };
    let state = AppState {
        store: Arc::new(HistoryStore::in_memory()),
        generator: Arc::new(ResponseGenerator::new(None, config.openai_model.clone())),
        config,
    };
    retailbot_api::router(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).expect("parse JSON");
    (status, json)
}

async fn post_chat(app: &Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("parse JSON");
    (status, json)
}

#[tokio::test]
async fn health_reports_degraded_capabilities() {
    let app = test_app();
    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], SERVICE_NAME);
    assert_eq!(json["ai_enabled"], false);
    assert_eq!(json["database_connected"], false);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn ready_endpoint_responds() {
    let app = test_app();
    let (status, json) = get_json(&app, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
}

#[tokio::test]
async fn root_banner_carries_links() {
    let app = test_app();
    let (status, json) = get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"], SERVICE_NAME);
    assert_eq!(json["health"], "/health");
    assert_eq!(json["metrics"], "/api/metrics");
}

#[tokio::test]
async fn chat_without_credential_uses_keyword_fallback() {
    let app = test_app();
    let (status, json) = post_chat(
        &app,
        serde_json::json!({"message": "How should I manage inventory?", "user_id": "u1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ai_powered"], false);
    assert_eq!(json["confidence"].as_f64(), Some(0.75));
    let text = json["response"].as_str().expect("response is string");
    assert!(text.contains("ABC analysis"), "unexpected advisory: {text}");
}

#[tokio::test]
async fn chat_echoes_session_id_only_when_present() {
    let app = test_app();

    let (_, json) = post_chat(
        &app,
        serde_json::json!({"message": "hello", "user_id": "u1", "session_id": "s-42"}),
    )
    .await;
    assert_eq!(json["session_id"], "s-42");

    let (_, json) = post_chat(&app, serde_json::json!({"message": "hello", "user_id": "u1"})).await;
    assert!(json.get("session_id").is_none());
}

#[tokio::test]
async fn chat_rejects_invalid_lengths_with_field_diagnostics() {
    let app = test_app();

    let (status, json) = post_chat(
        &app,
        serde_json::json!({"message": "m".repeat(1001), "user_id": "u1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].as_str().unwrap().contains("message"));

    let (status, json) = post_chat(
        &app,
        serde_json::json!({"message": "hello", "user_id": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("user_id"));
}

#[tokio::test]
async fn rejected_chat_stores_nothing() {
    let app = test_app();
    let (status, _) = post_chat(
        &app,
        serde_json::json!({"message": "", "user_id": "u9"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/user/u9/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_unknown_user_is_404() {
    let app = test_app();
    let (status, json) = get_json(&app, "/api/user/nobody/stats").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn stats_track_running_average_across_chats() {
    let app = test_app();

    for message in ["How should I manage inventory?", "what about my sales"] {
        let (status, _) =
            post_chat(&app, serde_json::json!({"message": message, "user_id": "u2"})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = get_json(&app, "/api/user/u2/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_messages"], 2);
    assert_eq!(json["total_ai_messages"], 0);
    // Both fallback replies carried confidence 0.75, so the mean is 0.75.
    assert_eq!(json["avg_confidence"].as_f64(), Some(0.75));
    assert!(json["first_seen"].is_string());
    assert!(json["last_seen"].is_string());
}

#[tokio::test]
async fn history_is_chronological_and_honors_limit() {
    let app = test_app();

    for message in ["first question", "second question", "third question"] {
        post_chat(&app, serde_json::json!({"message": message, "user_id": "u3"})).await;
    }

    let (status, json) = get_json(&app, "/api/chat/history/u3?limit=2").await;
    assert_eq!(status, StatusCode::OK);

    let items = json.as_array().expect("array body");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["message"], "second question");
    assert_eq!(items[1]["message"], "third question");
    for item in items {
        assert!(item["id"].is_i64());
        assert!(item["response"].is_string());
        assert!(item["confidence"].is_f64());
        assert!(item["ai_powered"].is_boolean());
        assert!(item["created_at"].is_string());
    }
}

#[tokio::test]
async fn history_for_unknown_user_is_empty_list() {
    let app = test_app();
    let (status, json) = get_json(&app, "/api/chat/history/ghost").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn metrics_aggregate_across_users() {
    let app = test_app();

    post_chat(&app, serde_json::json!({"message": "inventory?", "user_id": "a"})).await;
    post_chat(&app, serde_json::json!({"message": "sales?", "user_id": "b"})).await;

    let (status, json) = get_json(&app, "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_messages"], 2);
    assert_eq!(json["distinct_users"], 2);
    // Fallback-only mode: nothing is AI-powered.
    assert_eq!(json["ai_messages"], 0);
    assert_eq!(json["ai_percentage"].as_f64(), Some(0.0));
    assert_eq!(json["avg_ai_confidence"].as_f64(), Some(0.0));
}
