//! Integration tests for per-owner tier and roundtable settings.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{admin_token, body_json, build_test_app, get, put_json_auth};

// ---------------------------------------------------------------------------
// Tier settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn unconfigured_owner_gets_builtin_tier_defaults(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/tiers/default").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["owner_slug"], "default");
    assert_eq!(json["free_message_limit"], 5);
    assert_eq!(json["free_character_limit"], 10);
    assert_eq!(json["free_character_names"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn tier_upsert_persists_and_is_served_back(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/tiers/default",
        json!({
            "free_message_limit": 20,
            "free_character_limit": 3,
            "free_character_names": ["Charlie", "Socrates"]
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), "/api/v1/tiers/default").await;
    let json = body_json(response).await;
    assert_eq!(json["free_message_limit"], 20);
    assert_eq!(json["free_character_limit"], 3);
    assert_eq!(json["free_character_names"][0], "Charlie");

    // A second upsert replaces the row instead of conflicting.
    let response = put_json_auth(
        app.clone(),
        "/api/v1/tiers/default",
        json!({ "free_message_limit": 50, "free_character_limit": 5 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/tiers/default").await;
    let json = body_json(response).await;
    assert_eq!(json["free_message_limit"], 50);
    assert_eq!(json["free_character_names"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn tier_settings_are_isolated_per_owner(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    put_json_auth(
        app.clone(),
        "/api/v1/tiers/tenant-a",
        json!({ "free_message_limit": 99, "free_character_limit": 1 }),
        &token,
    )
    .await;

    let response = get(app, "/api/v1/tiers/default").await;
    let json = body_json(response).await;
    assert_eq!(json["free_message_limit"], 5);
}

#[sqlx::test(migrations = "../../migrations")]
async fn negative_tier_limits_are_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let response = put_json_auth(
        app,
        "/api/v1/tiers/default",
        json!({ "free_message_limit": -1, "free_character_limit": 10 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn tier_writes_require_admin(pool: PgPool) {
    let app = build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/tiers/default",
        json!({ "free_message_limit": 1, "free_character_limit": 1 }),
        "",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Roundtable settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn unconfigured_owner_gets_builtin_roundtable_defaults(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/roundtable-settings/default").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["defaults"]["replies_per_round"], 3);
    assert_eq!(json["defaults"]["max_words_per_reply"], 110);
    assert_eq!(json["limits"]["premium"]["max_participants"], 12);
    assert_eq!(json["locks"]["allow_all_speak"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn roundtable_upsert_persists_full_document(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    // Start from the served defaults and adjust a few knobs.
    let response = get(app.clone(), "/api/v1/roundtable-settings/default").await;
    let mut document = body_json(response).await;
    document["defaults"]["replies_per_round"] = json!(5);
    document["locks"]["strict_rotation"] = json!(true);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/roundtable-settings/default",
        document,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let written = body_json(response).await;
    assert_eq!(written["defaults"]["replies_per_round"], 5);
    assert_eq!(written["locks"]["strict_rotation"], true);

    // Re-read: the stored document comes back merged and complete.
    let response = get(app, "/api/v1/roundtable-settings/default").await;
    let json = body_json(response).await;
    assert_eq!(json["defaults"]["replies_per_round"], 5);
    assert_eq!(json["locks"]["strict_rotation"], true);
    assert_eq!(json["defaults"]["max_words_per_reply"], 110);
    assert_eq!(json["limits"]["free"]["creativity"]["max"], 0.9);
}

#[sqlx::test(migrations = "../../migrations")]
async fn partial_stored_row_is_merged_over_defaults_on_read(pool: PgPool) {
    // Simulate a row written by an older deployment, missing newer knobs.
    sqlx::query(
        "INSERT INTO roundtable_settings (owner_slug, defaults, limits, locks)
         VALUES ($1, $2, $3, $4)",
    )
    .bind("default")
    .bind(json!({ "replies_per_round": 2 }))
    .bind(json!({}))
    .bind(json!({ "save_by_default": true }))
    .execute(&pool)
    .await
    .expect("seed insert should succeed");
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/roundtable-settings/default").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["defaults"]["replies_per_round"], 2);
    assert_eq!(json["defaults"]["max_words_per_reply"], 110);
    assert_eq!(json["locks"]["save_by_default"], true);
    assert_eq!(json["locks"]["strict_rotation"], false);
    assert_eq!(json["limits"]["premium"]["creativity"]["max"], 1.0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn inverted_range_in_document_is_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let response = get(app.clone(), "/api/v1/roundtable-settings/default").await;
    let mut document = body_json(response).await;
    document["limits"]["free"]["creativity"] = json!({ "min": 0.9, "max": 0.2 });

    let response = put_json_auth(
        app,
        "/api/v1/roundtable-settings/default",
        document,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn defaults_outside_premium_range_are_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let response = get(app.clone(), "/api/v1/roundtable-settings/default").await;
    let mut document = body_json(response).await;
    document["defaults"]["replies_per_round"] = json!(9); // premium max is 6

    let response = put_json_auth(
        app,
        "/api/v1/roundtable-settings/default",
        document,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn roundtable_lookup_failure_serves_builtin_defaults(pool: PgPool) {
    let app = build_test_app(pool.clone());

    // Kill the pool out from under the handler: reads must degrade to the
    // built-in document rather than a 500, so the chat UI always renders.
    pool.close().await;

    let response = get(app, "/api/v1/roundtable-settings/default").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["defaults"]["replies_per_round"], 3);
    assert_eq!(json["defaults"]["max_words_per_reply"], 110);
    assert_eq!(json["limits"]["premium"]["max_participants"], 12);
}

#[sqlx::test(migrations = "../../migrations")]
async fn unusable_stored_roundtable_row_serves_builtin_defaults(pool: PgPool) {
    // A row whose defaults hold the wrong JSON type cannot deserialize; the
    // read falls back to the built-in document instead of erroring.
    sqlx::query(
        "INSERT INTO roundtable_settings (owner_slug, defaults, limits, locks)
         VALUES ('default', $1, '{}', '{}')",
    )
    .bind(serde_json::json!({ "replies_per_round": "three" }))
    .execute(&pool)
    .await
    .expect("seed insert should succeed");

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/roundtable-settings/default").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["defaults"]["replies_per_round"], 3);
}
