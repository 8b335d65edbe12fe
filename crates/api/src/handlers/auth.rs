//! Handlers for `/auth`: login, refresh-token rotation, logout.
//!
//! Login failures are counted per account; the fifth consecutive miss locks
//! the account for fifteen minutes. Each refresh spends the presented token
//! and issues a new pair, so a stolen refresh token dies the moment either
//! party uses it.

use askcharlie_core::error::CoreError;
use askcharlie_db::models::session::NewSession;
use askcharlie_db::models::user::User;
use askcharlie_db::repositories::{SessionRepo, UserRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{issue_access_token, refresh_digest, RefreshToken};
use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Consecutive failed logins before the account locks.
const MAX_FAILED_ATTEMPTS: i32 = 5;
/// Lockout duration once the limit is hit.
const LOCKOUT_MINS: i64 = 15;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshPayload {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: AccountSummary,
}

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: askcharlie_core::types::DbId,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<TokenPair>> {
    let user = UserRepo::find_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(bad_credentials)?;

    ensure_account_usable(&user)?;

    let valid = password::verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        let lock_until = Utc::now() + chrono::Duration::minutes(LOCKOUT_MINS);
        UserRepo::register_failed_login(&state.pool, user.id, MAX_FAILED_ATTEMPTS, lock_until)
            .await?;
        return Err(bad_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let pair = open_session(&state, &user).await?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/refresh
///
/// Rotate: the presented refresh token is spent and a new pair is issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> AppResult<Json<TokenPair>> {
    let digest = refresh_digest(&payload.refresh_token);
    let session = SessionRepo::consume_refresh_token(&state.pool, &digest)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    ensure_account_usable(&user)?;

    let pair = open_session(&state, &user).await?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session the caller holds. 204 on success.
pub async fn logout(State(state): State<AppState>, caller: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, caller.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// Reject deactivated and currently-locked accounts before any password
/// work happens.
fn ensure_account_usable(user: &User) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }
    Ok(())
}

/// Issue an access token, mint and persist a refresh token, and assemble
/// the response.
async fn open_session(state: &AppState, user: &User) -> AppResult<TokenPair> {
    let access_token = issue_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;

    let refresh = RefreshToken::issue();
    SessionRepo::create(
        &state.pool,
        &NewSession {
            user_id: user.id,
            refresh_token_hash: refresh.digest,
            expires_at: Utc::now()
                + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(TokenPair {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: AccountSummary {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        },
    })
}
