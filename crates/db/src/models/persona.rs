//! Persona entity model and DTOs.

use askcharlie_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persona row from the `personas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Persona {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub system_prompt: String,
    /// `'Debate'` or `'Lecture'`, enforced by a CHECK constraint.
    pub default_mode: String,
    pub avatar_url: Option<String>,
    pub feature_image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new persona.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersona {
    pub slug: String,
    pub name: String,
    pub system_prompt: String,
    /// Defaults to `'Debate'` if omitted.
    pub default_mode: Option<String>,
    pub avatar_url: Option<String>,
    pub feature_image_url: Option<String>,
}

/// DTO for updating an existing persona. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePersona {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub system_prompt: Option<String>,
    pub default_mode: Option<String>,
    pub avatar_url: Option<String>,
    pub feature_image_url: Option<String>,
}
