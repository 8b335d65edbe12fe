//! Route definitions for the `/faqs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::faq;
use crate::state::AppState;

/// Routes mounted at `/faqs`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (admin)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (admin)
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faq::list).post(faq::create))
        .route(
            "/{id}",
            get(faq::get_by_id).put(faq::update).delete(faq::delete),
        )
}
