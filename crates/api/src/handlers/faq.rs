//! Handlers for the `/faqs` resource.

use askcharlie_core::error::CoreError;
use askcharlie_core::types::DbId;
use askcharlie_db::models::faq::{CreateFaqItem, FaqItem, UpdateFaqItem};
use askcharlie_db::repositories::FaqRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/faqs
///
/// List all FAQ entries in display order.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FaqItem>>> {
    let items = FaqRepo::list(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/v1/faqs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FaqItem>> {
    let item = FaqRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id,
        }))?;
    Ok(Json(item))
}

/// POST /api/v1/faqs
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateFaqItem>,
) -> AppResult<(StatusCode, Json<FaqItem>)> {
    validate_faq(&input.question, &input.answer)?;
    let item = FaqRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/faqs/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaqItem>,
) -> AppResult<Json<FaqItem>> {
    if let (Some(q), Some(a)) = (&input.question, &input.answer) {
        validate_faq(q, a)?;
    }
    let item = FaqRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id,
        }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FaqRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id,
        }))
    }
}

fn validate_faq(question: &str, answer: &str) -> AppResult<()> {
    if question.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "question must not be empty".into(),
        )));
    }
    if answer.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "answer must not be empty".into(),
        )));
    }
    Ok(())
}
