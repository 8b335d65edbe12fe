//! FAQ entry model and DTOs.

use askcharlie_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `faq_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FaqItem {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new FAQ entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaqItem {
    pub question: String,
    pub answer: String,
    /// Defaults to 0 (top of the list) if omitted.
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing FAQ entry. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFaqItem {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub sort_order: Option<i32>,
}
