//! Integration tests for the chat proxy endpoint (`POST /api/openai/chat`).
//!
//! Upstream behavior is exercised against a local stub server bound to an
//! ephemeral port, so no real API key or network access is needed.

mod common;

use askcharlie_llm::OpenAiConfig;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, build_test_app, build_test_app_with_openai, post_json};

/// Spawn a stub chat-completions server returning a fixed status and body.
/// Returns the base URL to use as `api_url`.
async fn spawn_openai_stub(status: StatusCode, body: serde_json::Value) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind an ephemeral port");
    let addr = listener.local_addr().expect("stub should have a local addr");

    let handler = move || {
        let body = body.clone();
        async move { (status, Json(body)) }
    };
    let app = Router::new().route("/chat/completions", post(handler));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub should serve");
    });

    format!("http://{addr}")
}

fn stub_config(api_url: String) -> OpenAiConfig {
    OpenAiConfig {
        api_url,
        api_key: Some("test-key".to_string()),
        model: "gpt-4o-mini".to_string(),
    }
}

fn valid_request() -> serde_json::Value {
    json!({
        "characterName": "Charlie",
        "characterPersona": "A thoughtful debater.",
        "messages": [{ "role": "user", "content": "Hello" }]
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn chat_endpoint_answers_get_probe(pool: PgPool) {
    let app = build_test_app(pool);

    let response = common::get(app, "/api/openai/chat").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_character_name_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/openai/chat",
        json!({
            "characterPersona": "A thoughtful debater.",
            "messages": [{ "role": "user", "content": "Hello" }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Missing characterName, characterPersona or messages"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_persona_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/openai/chat",
        json!({
            "characterName": "Charlie",
            "characterPersona": "",
            "messages": [{ "role": "user", "content": "Hello" }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_messages_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/openai/chat",
        json!({
            "characterName": "Charlie",
            "characterPersona": "A thoughtful debater."
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn demo_mode_answers_without_api_key(pool: PgPool) {
    // build_test_app configures no API key, so the proxy stays in demo mode.
    let app = build_test_app(pool);

    let response = post_json(app, "/api/openai/chat", valid_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["text"], "OpenAI not configured. (Demo mode response)");
}

#[sqlx::test(migrations = "../../migrations")]
async fn successful_completion_returns_reply_text(pool: PgPool) {
    let stub_url = spawn_openai_stub(
        StatusCode::OK,
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Hello from upstream" } }
            ]
        }),
    )
    .await;
    let app = build_test_app_with_openai(pool, stub_config(stub_url));

    let response = post_json(app, "/api/openai/chat", valid_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["text"], "Hello from upstream");
}

#[sqlx::test(migrations = "../../migrations")]
async fn mode_and_context_fields_are_accepted(pool: PgPool) {
    let stub_url = spawn_openai_stub(
        StatusCode::OK,
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Grounded reply" } }
            ]
        }),
    )
    .await;
    let app = build_test_app_with_openai(pool, stub_config(stub_url));

    let response = post_json(
        app,
        "/api/openai/chat",
        json!({
            "characterName": "Charlie",
            "characterPersona": "A thoughtful debater.",
            "messages": [{ "role": "user", "content": "What about free will?" }],
            "mode": "Debate",
            "ragContext": [
                "a bare string snippet",
                { "content": "an attributed snippet", "source": "Transcript #3" }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "Grounded reply");
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_choices_returns_empty_text(pool: PgPool) {
    let stub_url = spawn_openai_stub(StatusCode::OK, json!({ "choices": [] })).await;
    let app = build_test_app_with_openai(pool, stub_config(stub_url));

    let response = post_json(app, "/api/openai/chat", valid_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["text"], "");
}

#[sqlx::test(migrations = "../../migrations")]
async fn upstream_error_maps_to_bad_gateway(pool: PgPool) {
    let stub_url = spawn_openai_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "message": "model blew up" } }),
    )
    .await;
    let app = build_test_app_with_openai(pool, stub_config(stub_url));

    let response = post_json(app, "/api/openai/chat", valid_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "OpenAI error 500");
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(
        json["details"]
            .as_str()
            .is_some_and(|d| d.contains("model blew up")),
        "upstream body excerpt should be echoed in details"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn upstream_rate_limit_status_is_preserved(pool: PgPool) {
    let stub_url = spawn_openai_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "message": "rate limited" } }),
    )
    .await;
    let app = build_test_app_with_openai(pool, stub_config(stub_url));

    let response = post_json(app, "/api/openai/chat", valid_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "OpenAI error 429");
}

#[sqlx::test(migrations = "../../migrations")]
async fn unreachable_upstream_maps_to_bad_gateway(pool: PgPool) {
    // Nothing listens on the stub address: the request fails at the
    // connection level rather than with an upstream status.
    let config = stub_config("http://127.0.0.1:9".to_string());
    let app = build_test_app_with_openai(pool, config);

    let response = post_json(app, "/api/openai/chat", valid_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "OpenAI request failed");
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}
