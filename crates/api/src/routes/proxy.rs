//! Route definitions for the legacy proxy endpoints mounted at `/api`.
//!
//! These two paths predate the versioned API and are kept verbatim so
//! existing clients keep working:
//!
//! ```text
//! POST /api/openai/chat   -> persona chat proxy
//! GET  /api/openai/chat   -> liveness probe ({"ok": true})
//! GET  /api/rag/search    -> transcript keyword search
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{chat, rag};
use crate::state::AppState;

/// Routes mounted at `/api` (NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/openai/chat", post(chat::chat).get(chat::probe))
        .route("/rag/search", get(rag::search))
}
