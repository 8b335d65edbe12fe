//! Repository for the `roundtable_settings` table.

use sqlx::PgPool;

use crate::models::roundtable_settings::RoundtableSettingsRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_slug, defaults, limits, locks, created_at, updated_at";

/// Provides lookup and upsert for per-owner roundtable settings documents.
pub struct RoundtableSettingsRepo;

impl RoundtableSettingsRepo {
    /// Find an owner's settings document. Returns `None` when the owner has
    /// no stored row (callers fall back to built-in defaults).
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_slug: &str,
    ) -> Result<Option<RoundtableSettingsRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roundtable_settings WHERE owner_slug = $1");
        sqlx::query_as::<_, RoundtableSettingsRow>(&query)
            .bind(owner_slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully replace an owner's settings document, returning the
    /// row.
    pub async fn upsert(
        pool: &PgPool,
        owner_slug: &str,
        defaults: &serde_json::Value,
        limits: &serde_json::Value,
        locks: &serde_json::Value,
    ) -> Result<RoundtableSettingsRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO roundtable_settings (owner_slug, defaults, limits, locks)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_roundtable_settings_owner_slug DO UPDATE SET
                defaults = EXCLUDED.defaults,
                limits = EXCLUDED.limits,
                locks = EXCLUDED.locks
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoundtableSettingsRow>(&query)
            .bind(owner_slug)
            .bind(defaults)
            .bind(limits)
            .bind(locks)
            .fetch_one(pool)
            .await
    }
}
