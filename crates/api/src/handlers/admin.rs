//! Handlers for `/admin/users`: console account management.
//!
//! Admin-only (`admin` or `superadmin` via [`RequireAdmin`]). Pastors curate
//! study content but never reach these routes. Role assignment is validated
//! against the seeded roles table so a typo'd role id reads as a 400, not a
//! foreign-key 500.

use askcharlie_core::error::CoreError;
use askcharlie_core::types::DbId;
use askcharlie_db::models::user::{NewUser, UserChanges, UserResponse};
use askcharlie_db::repositories::{RoleRepo, UserRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewUserPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: DbId,
}

/// All fields optional; role and activation changes ride the same route.
#[derive(Debug, Deserialize)]
pub struct UserChangesPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetPayload {
    pub new_password: String,
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Json(payload): Json<NewUserPayload>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    password::check_strength(&payload.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    ensure_known_role(&state, payload.role_id).await?;

    let password_hash = password::hash(&payload.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &NewUser {
            username: payload.username,
            email: payload.email,
            password_hash,
            role_id: payload.role_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(missing_user(id))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/admin/users/{id}
///
/// Profile, role, and activation updates. Passwords have their own route.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(id): Path<DbId>,
    Json(payload): Json<UserChangesPayload>,
) -> AppResult<Json<UserResponse>> {
    if let Some(role_id) = payload.role_id {
        ensure_known_role(&state, role_id).await?;
    }

    let changes = UserChanges {
        username: payload.username,
        email: payload.email,
        role_id: payload.role_id,
        is_active: payload.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(missing_user(id))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivation, not deletion. The row and its audit trail stay. 204 on
/// success.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if UserRepo::deactivate(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(missing_user(id))
    }
}

/// POST /api/v1/admin/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(id): Path<DbId>,
    Json(payload): Json<PasswordResetPayload>,
) -> AppResult<StatusCode> {
    password::check_strength(&payload.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = password::hash(&payload.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if UserRepo::update_password(&state.pool, id, &password_hash).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(missing_user(id))
    }
}

fn missing_user(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

async fn ensure_known_role(state: &AppState, role_id: DbId) -> AppResult<()> {
    if RoleRepo::find_by_id(&state.pool, role_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role id {role_id}"
        ))));
    }
    Ok(())
}
