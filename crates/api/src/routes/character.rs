//! Route definitions for the `/characters` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /          -> list (visible only)
/// POST   /          -> create (admin)
/// GET    /search    -> name search (?q=)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update (admin)
/// DELETE /{id}      -> delete (admin, soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list).post(character::create))
        .route("/search", get(character::search))
        .route(
            "/{id}",
            get(character::get_by_id)
                .put(character::update)
                .delete(character::delete),
        )
}
