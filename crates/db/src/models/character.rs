//! Character entity model and DTOs.

use askcharlie_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub persona_prompt: Option<String>,
    pub opening_line: Option<String>,
    pub avatar_url: Option<String>,
    pub feature_image_url: Option<String>,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub description: Option<String>,
    pub persona_prompt: Option<String>,
    pub opening_line: Option<String>,
    pub avatar_url: Option<String>,
    pub feature_image_url: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_visible: Option<bool>,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub persona_prompt: Option<String>,
    pub opening_line: Option<String>,
    pub avatar_url: Option<String>,
    pub feature_image_url: Option<String>,
    pub is_visible: Option<bool>,
}
