//! Repository for the `transcript_chunks` table.

use askcharlie_core::retrieval::escape_like_pattern;
use sqlx::PgPool;

use crate::models::transcript_chunk::{CreateTranscriptChunk, TranscriptChunk};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, transcript_id, content, source_url, created_at, updated_at";

/// Provides insert and keyword search over transcript chunks.
pub struct TranscriptChunkRepo;

impl TranscriptChunkRepo {
    /// Insert a transcript chunk, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTranscriptChunk,
    ) -> Result<TranscriptChunk, sqlx::Error> {
        let query = format!(
            "INSERT INTO transcript_chunks (transcript_id, content, source_url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TranscriptChunk>(&query)
            .bind(input.transcript_id)
            .bind(&input.content)
            .bind(&input.source_url)
            .fetch_one(pool)
            .await
    }

    /// Keyword search: case-insensitive substring match over `content`.
    ///
    /// ILIKE metacharacters in `term` are matched literally. Results are
    /// returned in insertion order, capped at `limit`.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        limit: i64,
    ) -> Result<Vec<TranscriptChunk>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like_pattern(term));
        let query = format!(
            "SELECT {COLUMNS} FROM transcript_chunks
             WHERE content ILIKE $1
             ORDER BY id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, TranscriptChunk>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
