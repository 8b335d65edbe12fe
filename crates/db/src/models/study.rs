//! Study and lesson models and DTOs.

use askcharlie_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `studies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Study {
    pub id: DbId,
    pub owner_slug: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub subject: Option<String>,
    /// `'public'` or `'private'`, enforced by a CHECK constraint.
    pub visibility: String,
    pub is_premium: bool,
    pub character_instructions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new study.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudy {
    /// Defaults to `'default'` if omitted.
    pub owner_slug: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub subject: Option<String>,
    /// Defaults to `'public'` if omitted.
    pub visibility: Option<String>,
    pub is_premium: Option<bool>,
    pub character_instructions: Option<String>,
}

/// DTO for updating an existing study. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudy {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub subject: Option<String>,
    pub visibility: Option<String>,
    pub is_premium: Option<bool>,
    pub character_instructions: Option<String>,
}

/// A row from the `study_lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub study_id: DbId,
    pub order_index: i32,
    pub title: String,
    pub scripture_refs: Vec<String>,
    pub summary: Option<String>,
    /// JSON array of prompt objects, e.g. `[{"text": "..."}]`.
    pub prompts: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new lesson.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLesson {
    /// Overridden from the URL path by the nested lesson routes.
    #[serde(default)]
    pub study_id: DbId,
    /// Defaults to 0 if omitted.
    pub order_index: Option<i32>,
    pub title: String,
    pub scripture_refs: Option<Vec<String>>,
    pub summary: Option<String>,
    pub prompts: Option<serde_json::Value>,
}

/// DTO for updating an existing lesson. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLesson {
    pub order_index: Option<i32>,
    pub title: Option<String>,
    pub scripture_refs: Option<Vec<String>>,
    pub summary: Option<String>,
    pub prompts: Option<serde_json::Value>,
}
