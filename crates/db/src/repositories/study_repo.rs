//! Repository for the `studies` and `study_lessons` tables.

use askcharlie_core::types::DbId;
use sqlx::PgPool;

use crate::models::study::{CreateLesson, CreateStudy, Lesson, Study, UpdateLesson, UpdateStudy};

/// Column list for `studies`.
const STUDY_COLUMNS: &str = "id, owner_slug, title, description, cover_image_url, subject, \
     visibility, is_premium, character_instructions, created_at, updated_at";

/// Column list for `study_lessons`.
const LESSON_COLUMNS: &str =
    "id, study_id, order_index, title, scripture_refs, summary, prompts, created_at, updated_at";

/// Provides CRUD operations for studies and their lessons.
pub struct StudyRepo;

impl StudyRepo {
    // -- studies -------------------------------------------------------------

    /// Insert a new study, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudy) -> Result<Study, sqlx::Error> {
        let query = format!(
            "INSERT INTO studies
                (owner_slug, title, description, cover_image_url, subject, visibility,
                 is_premium, character_instructions)
             VALUES (COALESCE($1, 'default'), $2, $3, $4, $5, COALESCE($6, 'public'),
                     COALESCE($7, FALSE), $8)
             RETURNING {STUDY_COLUMNS}"
        );
        sqlx::query_as::<_, Study>(&query)
            .bind(&input.owner_slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.subject)
            .bind(&input.visibility)
            .bind(input.is_premium)
            .bind(&input.character_instructions)
            .fetch_one(pool)
            .await
    }

    /// Find a study by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Study>, sqlx::Error> {
        let query = format!("SELECT {STUDY_COLUMNS} FROM studies WHERE id = $1");
        sqlx::query_as::<_, Study>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List studies for an owner, newest first. Private studies only when
    /// `include_private` is set.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_slug: &str,
        include_private: bool,
    ) -> Result<Vec<Study>, sqlx::Error> {
        let query = format!(
            "SELECT {STUDY_COLUMNS} FROM studies
             WHERE owner_slug = $1 AND (visibility = 'public' OR $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Study>(&query)
            .bind(owner_slug)
            .bind(include_private)
            .fetch_all(pool)
            .await
    }

    /// Update a study. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudy,
    ) -> Result<Option<Study>, sqlx::Error> {
        let query = format!(
            "UPDATE studies SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                cover_image_url = COALESCE($4, cover_image_url),
                subject = COALESCE($5, subject),
                visibility = COALESCE($6, visibility),
                is_premium = COALESCE($7, is_premium),
                character_instructions = COALESCE($8, character_instructions)
             WHERE id = $1
             RETURNING {STUDY_COLUMNS}"
        );
        sqlx::query_as::<_, Study>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.subject)
            .bind(&input.visibility)
            .bind(input.is_premium)
            .bind(&input.character_instructions)
            .fetch_optional(pool)
            .await
    }

    /// Delete a study by ID. Lessons cascade. Returns `true` if a row was
    /// deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM studies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- lessons -------------------------------------------------------------

    /// Insert a new lesson, returning the created row.
    pub async fn create_lesson(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO study_lessons
                (study_id, order_index, title, scripture_refs, summary, prompts)
             VALUES ($1, COALESCE($2, 0), $3, COALESCE($4, '{{}}'), $5, COALESCE($6, '[]'::jsonb))
             RETURNING {LESSON_COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.study_id)
            .bind(input.order_index)
            .bind(&input.title)
            .bind(&input.scripture_refs)
            .bind(&input.summary)
            .bind(&input.prompts)
            .fetch_one(pool)
            .await
    }

    /// Find a lesson by its internal ID.
    pub async fn find_lesson_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {LESSON_COLUMNS} FROM study_lessons WHERE id = $1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a study's lessons ordered by `order_index` ascending.
    pub async fn list_lessons(pool: &PgPool, study_id: DbId) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {LESSON_COLUMNS} FROM study_lessons
             WHERE study_id = $1
             ORDER BY order_index ASC, id ASC"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(study_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lesson. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_lesson(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLesson,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "UPDATE study_lessons SET
                order_index = COALESCE($2, order_index),
                title = COALESCE($3, title),
                scripture_refs = COALESCE($4, scripture_refs),
                summary = COALESCE($5, summary),
                prompts = COALESCE($6, prompts)
             WHERE id = $1
             RETURNING {LESSON_COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .bind(input.order_index)
            .bind(&input.title)
            .bind(&input.scripture_refs)
            .bind(&input.summary)
            .bind(&input.prompts)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lesson by ID. Returns `true` if a row was deleted.
    pub async fn delete_lesson(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM study_lessons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
