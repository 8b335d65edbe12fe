//! Handlers for the `/studies` resource and nested lessons.
//!
//! Public reads see only `visibility = 'public'` studies. Curation (create,
//! update, delete, and the private-inclusive listing) requires the `pastor`
//! role or higher.

use askcharlie_core::error::CoreError;
use askcharlie_core::tiers::DEFAULT_OWNER_SLUG;
use askcharlie_core::types::DbId;
use askcharlie_db::models::study::{
    CreateLesson, CreateStudy, Lesson, Study, UpdateLesson, UpdateStudy,
};
use askcharlie_db::repositories::StudyRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePastor;
use crate::state::AppState;

/// Query parameters for study listings.
#[derive(Debug, Deserialize)]
pub struct StudyListParams {
    /// Owner slug; defaults to the single-tenant `'default'` owner.
    #[serde(default)]
    pub owner: Option<String>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/studies?owner={slug}
///
/// List an owner's public studies, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<StudyListParams>,
) -> AppResult<Json<Vec<Study>>> {
    let owner = params.owner.as_deref().unwrap_or(DEFAULT_OWNER_SLUG);
    let studies = StudyRepo::list_by_owner(&state.pool, owner, false).await?;
    Ok(Json(studies))
}

/// GET /api/v1/studies/{id}
///
/// Private studies are indistinguishable from missing ones for public reads.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Study>> {
    let study = find_public_study(&state, id).await?;
    Ok(Json(study))
}

/// GET /api/v1/studies/{study_id}/lessons
pub async fn list_lessons(
    State(state): State<AppState>,
    Path(study_id): Path<DbId>,
) -> AppResult<Json<Vec<Lesson>>> {
    // 404 for missing or private parent study.
    find_public_study(&state, study_id).await?;
    let lessons = StudyRepo::list_lessons(&state.pool, study_id).await?;
    Ok(Json(lessons))
}

// ---------------------------------------------------------------------------
// Curation handlers (pastor or admin)
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/studies?owner={slug}
///
/// List an owner's studies including private ones.
pub async fn list_all(
    State(state): State<AppState>,
    RequirePastor(_user): RequirePastor,
    Query(params): Query<StudyListParams>,
) -> AppResult<Json<Vec<Study>>> {
    let owner = params.owner.as_deref().unwrap_or(DEFAULT_OWNER_SLUG);
    let studies = StudyRepo::list_by_owner(&state.pool, owner, true).await?;
    Ok(Json(studies))
}

/// POST /api/v1/studies
pub async fn create(
    State(state): State<AppState>,
    RequirePastor(_user): RequirePastor,
    Json(input): Json<CreateStudy>,
) -> AppResult<(StatusCode, Json<Study>)> {
    validate_study(&input.title, input.visibility.as_deref())?;
    let study = StudyRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(study)))
}

/// PUT /api/v1/studies/{id}
pub async fn update(
    State(state): State<AppState>,
    RequirePastor(_user): RequirePastor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudy>,
) -> AppResult<Json<Study>> {
    if let Some(title) = &input.title {
        validate_study(title, input.visibility.as_deref())?;
    } else if let Some(visibility) = &input.visibility {
        validate_visibility(visibility)?;
    }
    let study = StudyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Study", id }))?;
    Ok(Json(study))
}

/// DELETE /api/v1/studies/{id}
///
/// Deletes the study and its lessons (cascade). Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequirePastor(_user): RequirePastor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StudyRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Study", id }))
    }
}

/// POST /api/v1/studies/{study_id}/lessons
///
/// Overrides `input.study_id` with the value from the URL path.
pub async fn create_lesson(
    State(state): State<AppState>,
    RequirePastor(_user): RequirePastor,
    Path(study_id): Path<DbId>,
    Json(mut input): Json<CreateLesson>,
) -> AppResult<(StatusCode, Json<Lesson>)> {
    // The parent study must exist.
    StudyRepo::find_by_id(&state.pool, study_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Study",
            id: study_id,
        }))?;

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }

    input.study_id = study_id;
    let lesson = StudyRepo::create_lesson(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// PUT /api/v1/studies/{study_id}/lessons/{id}
pub async fn update_lesson(
    State(state): State<AppState>,
    RequirePastor(_user): RequirePastor,
    Path((_study_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateLesson>,
) -> AppResult<Json<Lesson>> {
    let lesson = StudyRepo::update_lesson(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id,
        }))?;
    Ok(Json(lesson))
}

/// DELETE /api/v1/studies/{study_id}/lessons/{id}
pub async fn delete_lesson(
    State(state): State<AppState>,
    RequirePastor(_user): RequirePastor,
    Path((_study_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = StudyRepo::delete_lesson(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a study for public consumption: missing and private both 404.
async fn find_public_study(state: &AppState, id: DbId) -> AppResult<Study> {
    let study = StudyRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|s| s.visibility == "public")
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Study", id }))?;
    Ok(study)
}

fn validate_study(title: &str, visibility: Option<&str>) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    if let Some(visibility) = visibility {
        validate_visibility(visibility)?;
    }
    Ok(())
}

fn validate_visibility(visibility: &str) -> AppResult<()> {
    if visibility != "public" && visibility != "private" {
        return Err(AppError::Core(CoreError::Validation(format!(
            "visibility must be 'public' or 'private', got '{visibility}'"
        ))));
    }
    Ok(())
}
