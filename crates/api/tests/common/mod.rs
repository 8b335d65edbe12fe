//! Shared fixtures and request helpers for HTTP-level integration tests.
//!
//! Requests are sent directly to the router via `tower::ServiceExt::oneshot`,
//! so no TCP listener is needed and each test runs against its own
//! `#[sqlx::test]` database.

#![allow(dead_code)]

use askcharlie_llm::OpenAiConfig;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use askcharlie_api::auth::jwt::JwtConfig;
use askcharlie_api::auth::password;
use askcharlie_api::config::ServerConfig;
use askcharlie_api::router::build_app_router;
use askcharlie_api::state::AppState;
use askcharlie_db::models::user::{NewUser, User};
use askcharlie_db::repositories::UserRepo;

/// Role ids as seeded by the first migration.
pub const ROLE_ID_ADMIN: i64 = 1;
pub const ROLE_ID_SUPERADMIN: i64 = 2;
pub const ROLE_ID_PASTOR: i64 = 3;
pub const ROLE_ID_USER: i64 = 4;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Upstream config with no API key: the chat proxy stays in demo mode.
pub fn demo_openai_config() -> OpenAiConfig {
    OpenAiConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        api_key: None,
        model: "gpt-4o-mini".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and demo-mode upstream config.
///
/// This goes through the same [`build_app_router`] that production uses, so
/// integration tests exercise the identical middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_openai(pool, demo_openai_config())
}

/// Build the application router against a specific upstream config (used by
/// chat proxy tests that point at a local stub server).
pub fn build_test_app_with_openai(pool: PgPool, openai: OpenAiConfig) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), openai);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Database fixtures
// ---------------------------------------------------------------------------

/// Create a test user directly in the database and return the user row plus
/// the plaintext password used.
pub async fn create_test_user(pool: &PgPool, username: &str, role_id: i64) -> (User, String) {
    let password = "test_password_123!";
    let hashed = password::hash(password).expect("hashing should succeed");
    let input = NewUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        role_id,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in a user via the API and return the access token.
pub async fn login_token(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

/// Create an admin user and return a valid access token for it.
pub async fn admin_token(pool: &PgPool, app: Router) -> String {
    let (_user, password) = create_test_user(pool, "fixture_admin", ROLE_ID_ADMIN).await;
    login_token(app, "fixture_admin", &password).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST a raw body with an explicit content type (CSV import).
pub async fn post_body_auth(
    app: Router,
    uri: &str,
    content_type: &str,
    body: String,
    token: &str,
) -> Response {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(
        app,
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Collect a response body as a UTF-8 string (CSV export).
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be valid UTF-8")
}
