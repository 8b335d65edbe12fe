//! Handlers for the `/characters` resource.
//!
//! Public reads return only visible characters; the admin listing under
//! `/admin/characters` includes hidden ones. Writes require the `admin` role.

use askcharlie_core::error::CoreError;
use askcharlie_core::types::DbId;
use askcharlie_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use askcharlie_db::repositories::CharacterRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query parameters for `GET /characters/search`.
#[derive(Debug, Deserialize)]
pub struct CharacterSearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/characters
///
/// List visible characters.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Character>>> {
    let characters = CharacterRepo::list(&state.pool, false).await?;
    Ok(Json(characters))
}

/// GET /api/v1/characters/search?q={term}
///
/// Name search over visible characters. An empty query returns every
/// visible character.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<CharacterSearchParams>,
) -> AppResult<Json<Vec<Character>>> {
    let term = params.q.unwrap_or_default();
    let characters = if term.is_empty() {
        CharacterRepo::list(&state.pool, false).await?
    } else {
        CharacterRepo::search(&state.pool, &term, false).await?
    };
    Ok(Json(characters))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Character>> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/characters
///
/// List all characters, including hidden ones.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Character>>> {
    let characters = CharacterRepo::list(&state.pool, true).await?;
    Ok(Json(characters))
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    validate_name(&input.name)?;
    let character = CharacterRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// PUT /api/v1/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

/// DELETE /api/v1/characters/{id}
///
/// Soft delete. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CharacterRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    Ok(())
}
