//! Transcript chunk model and DTOs.

use askcharlie_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `transcript_chunks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TranscriptChunk {
    pub id: DbId,
    pub transcript_id: DbId,
    pub content: String,
    pub source_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TranscriptChunk {
    /// Source attribution for a chunk: the URL when present, otherwise a
    /// `Transcript #{id}` label.
    pub fn source_label(&self) -> String {
        self.source_url
            .clone()
            .unwrap_or_else(|| format!("Transcript #{}", self.transcript_id))
    }
}

/// DTO for inserting a transcript chunk (ingest tooling and tests).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTranscriptChunk {
    pub transcript_id: DbId,
    pub content: String,
    pub source_url: Option<String>,
}
