//! Repository for the `tier_settings` table.

use sqlx::PgPool;

use crate::models::tier_settings::{TierSettings, UpsertTierSettings};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_slug, free_message_limit, free_character_limit, \
     free_character_names, created_at, updated_at";

/// Provides lookup and upsert for per-owner tier settings.
pub struct TierSettingsRepo;

impl TierSettingsRepo {
    /// Find an owner's tier settings. Returns `None` when the owner has no
    /// stored row (callers fall back to defaults).
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_slug: &str,
    ) -> Result<Option<TierSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tier_settings WHERE owner_slug = $1");
        sqlx::query_as::<_, TierSettings>(&query)
            .bind(owner_slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully replace an owner's tier settings, returning the row.
    pub async fn upsert(
        pool: &PgPool,
        owner_slug: &str,
        input: &UpsertTierSettings,
    ) -> Result<TierSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO tier_settings
                (owner_slug, free_message_limit, free_character_limit, free_character_names)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'))
             ON CONFLICT ON CONSTRAINT uq_tier_settings_owner_slug DO UPDATE SET
                free_message_limit = EXCLUDED.free_message_limit,
                free_character_limit = EXCLUDED.free_character_limit,
                free_character_names = EXCLUDED.free_character_names
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TierSettings>(&query)
            .bind(owner_slug)
            .bind(input.free_message_limit)
            .bind(input.free_character_limit)
            .bind(&input.free_character_names)
            .fetch_one(pool)
            .await
    }
}
