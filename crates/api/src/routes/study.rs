//! Route definitions for the `/studies` resource and nested lessons.

use axum::routing::get;
use axum::Router;

use crate::handlers::study;
use crate::state::AppState;

/// Routes mounted at `/studies`.
///
/// ```text
/// GET    /                            -> list public (?owner=)
/// POST   /                            -> create (pastor+)
/// GET    /{id}                        -> get_by_id (public only)
/// PUT    /{id}                        -> update (pastor+)
/// DELETE /{id}                        -> delete (pastor+)
/// GET    /{study_id}/lessons          -> list_lessons
/// POST   /{study_id}/lessons          -> create_lesson (pastor+)
/// PUT    /{study_id}/lessons/{id}     -> update_lesson (pastor+)
/// DELETE /{study_id}/lessons/{id}     -> delete_lesson (pastor+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(study::list).post(study::create))
        .route(
            "/{id}",
            get(study::get_by_id)
                .put(study::update)
                .delete(study::delete),
        )
        .route(
            "/{study_id}/lessons",
            get(study::list_lessons).post(study::create_lesson),
        )
        .route(
            "/{study_id}/lessons/{id}",
            axum::routing::put(study::update_lesson).delete(study::delete_lesson),
        )
}
