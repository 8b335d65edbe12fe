//! Handlers for per-owner tier settings (`/tiers/{owner_slug}`).
//!
//! Reads are public so the front end can gate features before login; an
//! owner with no stored row gets the built-in defaults. Writes require the
//! `admin` role and upsert the whole row.

use askcharlie_core::tiers::{
    validate_limits, DEFAULT_FREE_CHARACTER_LIMIT, DEFAULT_FREE_MESSAGE_LIMIT,
};
use askcharlie_db::models::tier_settings::UpsertTierSettings;
use askcharlie_db::repositories::TierSettingsRepo;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Tier settings as served to clients. Unlike the database row, this is
/// always present (defaults fill in for unconfigured owners).
#[derive(Debug, Serialize)]
pub struct TierSettingsResponse {
    pub owner_slug: String,
    pub free_message_limit: i32,
    pub free_character_limit: i32,
    pub free_character_names: Vec<String>,
}

/// GET /api/v1/tiers/{owner_slug}
///
/// Resolve an owner's tier settings, falling back to built-in defaults when
/// the owner has no stored row.
pub async fn get_for_owner(
    State(state): State<AppState>,
    Path(owner_slug): Path<String>,
) -> AppResult<Json<TierSettingsResponse>> {
    let response = match TierSettingsRepo::find_by_owner(&state.pool, &owner_slug).await? {
        Some(row) => TierSettingsResponse {
            owner_slug: row.owner_slug,
            free_message_limit: row.free_message_limit,
            free_character_limit: row.free_character_limit,
            free_character_names: row.free_character_names,
        },
        None => TierSettingsResponse {
            owner_slug,
            free_message_limit: DEFAULT_FREE_MESSAGE_LIMIT,
            free_character_limit: DEFAULT_FREE_CHARACTER_LIMIT,
            free_character_names: Vec::new(),
        },
    };
    Ok(Json(response))
}

/// PUT /api/v1/tiers/{owner_slug}
///
/// Insert or replace an owner's tier settings.
pub async fn upsert_for_owner(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(owner_slug): Path<String>,
    Json(input): Json<UpsertTierSettings>,
) -> AppResult<Json<TierSettingsResponse>> {
    validate_limits(input.free_message_limit, input.free_character_limit)?;

    let row = TierSettingsRepo::upsert(&state.pool, &owner_slug, &input).await?;
    Ok(Json(TierSettingsResponse {
        owner_slug: row.owner_slug,
        free_message_limit: row.free_message_limit,
        free_character_limit: row.free_character_limit,
        free_character_names: row.free_character_names,
    }))
}
