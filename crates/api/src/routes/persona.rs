//! Route definitions for the `/personas` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::persona;
use crate::state::AppState;

/// Routes mounted at `/personas`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create (admin)
/// GET    /export.csv        -> CSV export (admin)
/// POST   /import            -> CSV import, replaces all (admin)
/// GET    /by-slug/{slug}    -> get_by_slug
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update (admin)
/// DELETE /{id}              -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(persona::list).post(persona::create))
        .route("/export.csv", get(persona::export_csv))
        .route("/import", post(persona::import_csv))
        .route("/by-slug/{slug}", get(persona::get_by_slug))
        .route(
            "/{id}",
            get(persona::get_by_id)
                .put(persona::update)
                .delete(persona::delete),
        )
}
