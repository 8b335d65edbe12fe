//! Handler for keyword retrieval (`GET /api/rag/search`).
//!
//! The endpoint is deliberately forgiving: an empty query, a storage error,
//! or an unreachable database all produce `{ "items": [] }` with 200 OK, so
//! a degraded retrieval layer never breaks the chat UI.

use askcharlie_core::retrieval::clamp_search_limit;
use askcharlie_core::types::DbId;
use askcharlie_db::repositories::TranscriptChunkRepo;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Query parameters for `GET /api/rag/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub k: Option<i64>,
}

/// A single search hit.
#[derive(Debug, Serialize)]
pub struct SearchItem {
    pub id: DbId,
    pub content: String,
    /// Source URL when recorded, otherwise a `Transcript #{id}` label.
    pub source: String,
}

/// Response body: matching transcript chunks.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

/// GET /api/rag/search?q={term}&k={limit}
///
/// Case-insensitive substring search over transcript chunks.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let term = params.q.unwrap_or_default();
    if term.is_empty() {
        return Json(SearchResponse { items: Vec::new() });
    }

    let limit = clamp_search_limit(params.k);

    let items = match TranscriptChunkRepo::search(&state.pool, &term, limit).await {
        Ok(chunks) => chunks
            .into_iter()
            .map(|chunk| SearchItem {
                id: chunk.id,
                source: chunk.source_label(),
                content: chunk.content,
            })
            .collect(),
        Err(e) => {
            // Retrieval failures degrade to an empty result set.
            tracing::warn!(error = %e, "Transcript search failed");
            Vec::new()
        }
    };

    Json(SearchResponse { items })
}
