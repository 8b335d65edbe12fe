//! Repository for the `personas` table.

use askcharlie_core::types::DbId;
use sqlx::PgPool;

use crate::models::persona::{CreatePersona, Persona, UpdatePersona};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, name, system_prompt, default_mode, avatar_url, \
     feature_image_url, created_at, updated_at";

/// Provides CRUD operations for personas plus bulk replacement (CSV import).
pub struct PersonaRepo;

impl PersonaRepo {
    /// Insert a new persona, returning the created row.
    ///
    /// If `default_mode` is `None`, defaults to `'Debate'`.
    pub async fn create(pool: &PgPool, input: &CreatePersona) -> Result<Persona, sqlx::Error> {
        let query = format!(
            "INSERT INTO personas
                (slug, name, system_prompt, default_mode, avatar_url, feature_image_url)
             VALUES ($1, $2, $3, COALESCE($4, 'Debate'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.system_prompt)
            .bind(&input.default_mode)
            .bind(&input.avatar_url)
            .bind(&input.feature_image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a persona by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Persona>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personas WHERE id = $1");
        sqlx::query_as::<_, Persona>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a persona by its unique slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Persona>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personas WHERE slug = $1");
        sqlx::query_as::<_, Persona>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all personas ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Persona>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM personas ORDER BY name ASC");
        sqlx::query_as::<_, Persona>(&query).fetch_all(pool).await
    }

    /// Update a persona. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePersona,
    ) -> Result<Option<Persona>, sqlx::Error> {
        let query = format!(
            "UPDATE personas SET
                slug = COALESCE($2, slug),
                name = COALESCE($3, name),
                system_prompt = COALESCE($4, system_prompt),
                default_mode = COALESCE($5, default_mode),
                avatar_url = COALESCE($6, avatar_url),
                feature_image_url = COALESCE($7, feature_image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.system_prompt)
            .bind(&input.default_mode)
            .bind(&input.avatar_url)
            .bind(&input.feature_image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a persona by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the entire persona set in one transaction (CSV import
    /// semantics: the imported file becomes the new source of truth).
    pub async fn replace_all(
        pool: &PgPool,
        personas: &[CreatePersona],
    ) -> Result<Vec<Persona>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM personas").execute(&mut *tx).await?;

        let insert = format!(
            "INSERT INTO personas
                (slug, name, system_prompt, default_mode, avatar_url, feature_image_url)
             VALUES ($1, $2, $3, COALESCE($4, 'Debate'), $5, $6)
             RETURNING {COLUMNS}"
        );

        let mut created = Vec::with_capacity(personas.len());
        for input in personas {
            let persona = sqlx::query_as::<_, Persona>(&insert)
                .bind(&input.slug)
                .bind(&input.name)
                .bind(&input.system_prompt)
                .bind(&input.default_mode)
                .bind(&input.avatar_url)
                .bind(&input.feature_image_url)
                .fetch_one(&mut *tx)
                .await?;
            created.push(persona);
        }

        tx.commit().await?;
        Ok(created)
    }
}
