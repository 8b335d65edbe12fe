//! Tier settings model and DTOs.

use askcharlie_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tier_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TierSettings {
    pub id: DbId,
    pub owner_slug: String,
    pub free_message_limit: i32,
    pub free_character_limit: i32,
    pub free_character_names: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting an owner's tier settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertTierSettings {
    pub free_message_limit: i32,
    pub free_character_limit: i32,
    /// Defaults to an empty list if omitted.
    pub free_character_names: Option<Vec<String>>,
}
