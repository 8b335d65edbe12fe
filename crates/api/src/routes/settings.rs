//! Route definitions for per-owner settings resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{roundtable, tier};
use crate::state::AppState;

/// Settings routes merged directly into `/api/v1`.
///
/// ```text
/// GET /tiers/{owner_slug}                   -> tier settings (defaults fallback)
/// PUT /tiers/{owner_slug}                   -> upsert tier settings (admin)
/// GET /roundtable-settings/{owner_slug}     -> roundtable document (merged)
/// PUT /roundtable-settings/{owner_slug}     -> upsert roundtable document (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tiers/{owner_slug}",
            get(tier::get_for_owner).put(tier::upsert_for_owner),
        )
        .route(
            "/roundtable-settings/{owner_slug}",
            get(roundtable::get_for_owner).put(roundtable::upsert_for_owner),
        )
}
