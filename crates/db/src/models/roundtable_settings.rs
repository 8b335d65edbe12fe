//! Roundtable settings row model.
//!
//! The three document columns are stored as raw JSONB; deserialization into
//! the typed [`askcharlie_core::roundtable`] document happens at the handler
//! layer where merge-over-defaults is applied.

use askcharlie_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `roundtable_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoundtableSettingsRow {
    pub id: DbId,
    pub owner_slug: String,
    pub defaults: serde_json::Value,
    pub limits: serde_json::Value,
    pub locks: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
