//! Repository for the `characters` table.

use askcharlie_core::retrieval::escape_like_pattern;
use askcharlie_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, persona_prompt, opening_line, avatar_url, \
     feature_image_url, is_visible, created_at, updated_at";

/// Provides CRUD operations for characters plus name search.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    ///
    /// If `is_visible` is `None`, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters
                (name, description, persona_prompt, opening_line, avatar_url, feature_image_url, is_visible)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.persona_prompt)
            .bind(&input.opening_line)
            .bind(&input.avatar_url)
            .bind(&input.feature_image_url)
            .bind(input.is_visible)
            .fetch_one(pool)
            .await
    }

    /// Find a character by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM characters WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List characters ordered by name ascending. Excludes soft-deleted rows;
    /// hidden characters only when `include_hidden` is set.
    pub async fn list(pool: &PgPool, include_hidden: bool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE deleted_at IS NULL AND (is_visible OR $1)
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(include_hidden)
            .fetch_all(pool)
            .await
    }

    /// Search characters by name substring (case-insensitive), ordered by
    /// name. ILIKE metacharacters in `term` are matched literally.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        include_hidden: bool,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like_pattern(term));
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE deleted_at IS NULL AND name ILIKE $1 AND (is_visible OR $2)
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(pattern)
            .bind(include_hidden)
            .fetch_all(pool)
            .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                persona_prompt = COALESCE($4, persona_prompt),
                opening_line = COALESCE($5, opening_line),
                avatar_url = COALESCE($6, avatar_url),
                feature_image_url = COALESCE($7, feature_image_url),
                is_visible = COALESCE($8, is_visible)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.persona_prompt)
            .bind(&input.opening_line)
            .bind(&input.avatar_url)
            .bind(&input.feature_image_url)
            .bind(input.is_visible)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a character by ID. Returns `true` if a row was marked
    /// deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE characters SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
