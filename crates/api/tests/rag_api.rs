//! Integration tests for keyword retrieval (`GET /api/rag/search`).

mod common;

use askcharlie_db::models::transcript_chunk::CreateTranscriptChunk;
use askcharlie_db::repositories::TranscriptChunkRepo;
use axum::http::StatusCode;
use sqlx::PgPool;

use common::{body_json, build_test_app, get};

async fn seed_chunk(pool: &PgPool, transcript_id: i64, content: &str, source_url: Option<&str>) {
    let input = CreateTranscriptChunk {
        transcript_id,
        content: content.to_string(),
        source_url: source_url.map(str::to_string),
    };
    TranscriptChunkRepo::create(pool, &input)
        .await
        .expect("chunk insert should succeed");
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_query_returns_empty_items(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/rag/search").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_query_returns_empty_items(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/rag/search?q=").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn search_matches_case_insensitively(pool: PgPool) {
    seed_chunk(
        &pool,
        1,
        "The nature of Free Will has been debated for centuries.",
        Some("https://example.com/lecture-1"),
    )
    .await;
    seed_chunk(&pool, 1, "Unrelated content about gardening.", None).await;
    let app = build_test_app(pool);

    let response = get(app, "/api/rag/search?q=free%20will").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 1);
    assert!(items[0]["content"]
        .as_str()
        .expect("content should be a string")
        .contains("Free Will"));
    assert_eq!(items[0]["source"], "https://example.com/lecture-1");
}

#[sqlx::test(migrations = "../../migrations")]
async fn source_falls_back_to_transcript_label(pool: PgPool) {
    seed_chunk(&pool, 7, "Discussion of stoicism and virtue.", None).await;
    let app = build_test_app(pool);

    let response = get(app, "/api/rag/search?q=stoicism").await;
    let json = body_json(response).await;
    let items = json["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["source"], "Transcript #7");
}

#[sqlx::test(migrations = "../../migrations")]
async fn no_match_returns_empty_items(pool: PgPool) {
    seed_chunk(&pool, 1, "Discussion of stoicism and virtue.", None).await;
    let app = build_test_app(pool);

    let response = get(app, "/api/rag/search?q=quantum").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn limit_parameter_caps_results(pool: PgPool) {
    for i in 0..8 {
        seed_chunk(&pool, 1, &format!("ethics snippet number {i}"), None).await;
    }
    let app = build_test_app(pool);

    let response = get(app, "/api/rag/search?q=ethics&k=3").await;
    let json = body_json(response).await;
    assert_eq!(json["items"].as_array().map(Vec::len), Some(3));
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_limit_defaults_to_five(pool: PgPool) {
    for i in 0..8 {
        seed_chunk(&pool, 1, &format!("ethics snippet number {i}"), None).await;
    }
    let app = build_test_app(pool);

    let response = get(app, "/api/rag/search?q=ethics").await;
    let json = body_json(response).await;
    assert_eq!(json["items"].as_array().map(Vec::len), Some(5));
}

#[sqlx::test(migrations = "../../migrations")]
async fn like_wildcards_in_query_are_literal(pool: PgPool) {
    seed_chunk(&pool, 1, "Completely ordinary sentence.", None).await;
    seed_chunk(&pool, 1, "Contains a literal 100% figure.", None).await;
    let app = build_test_app(pool);

    // `%` must match only the literal character, not act as a wildcard.
    let response = get(app, "/api/rag/search?q=100%25").await;
    let json = body_json(response).await;
    let items = json["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "Contains a literal 100% figure.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn database_failure_still_returns_empty_items(pool: PgPool) {
    let app = build_test_app(pool.clone());

    // Kill the pool out from under the handler: the search must degrade to
    // an empty result set instead of surfacing a 500.
    pool.close().await;

    let response = get(app, "/api/rag/search?q=anything").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
}
