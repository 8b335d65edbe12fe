//! Repository for the `faq_items` table.

use askcharlie_core::types::DbId;
use sqlx::PgPool;

use crate::models::faq::{CreateFaqItem, FaqItem, UpdateFaqItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question, answer, sort_order, created_at, updated_at";

/// Provides CRUD operations for FAQ entries.
pub struct FaqRepo;

impl FaqRepo {
    /// Insert a new FAQ entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFaqItem) -> Result<FaqItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO faq_items (question, answer, sort_order)
             VALUES ($1, $2, COALESCE($3, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaqItem>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find an FAQ entry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FaqItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_items WHERE id = $1");
        sqlx::query_as::<_, FaqItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all FAQ entries in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<FaqItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_items ORDER BY sort_order ASC, id ASC");
        sqlx::query_as::<_, FaqItem>(&query).fetch_all(pool).await
    }

    /// Update an FAQ entry. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaqItem,
    ) -> Result<Option<FaqItem>, sqlx::Error> {
        let query = format!(
            "UPDATE faq_items SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                sort_order = COALESCE($4, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaqItem>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an FAQ entry by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faq_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
