//! Handlers for the `/personas` resource, including CSV export/import.
//!
//! Personas are the debate-partner roster. The CSV round trip exists so an
//! operator can edit the whole roster in a spreadsheet; import replaces the
//! full set atomically.

use askcharlie_core::error::CoreError;
use askcharlie_core::types::DbId;
use askcharlie_db::models::persona::{CreatePersona, Persona, UpdatePersona};
use askcharlie_db::repositories::PersonaRepo;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// One persona row in the CSV wire format. The `id` column carries the slug.
#[derive(Debug, Serialize, Deserialize)]
struct CsvPersonaRow {
    id: String,
    name: String,
    avatar_url: String,
    feature_image_url: String,
    default_mode: String,
    system_prompt: String,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/personas
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Persona>>> {
    let personas = PersonaRepo::list(&state.pool).await?;
    Ok(Json(personas))
}

/// GET /api/v1/personas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Persona>> {
    let persona = PersonaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Persona",
            id,
        }))?;
    Ok(Json(persona))
}

/// GET /api/v1/personas/by-slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Persona>> {
    let persona = PersonaRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Persona with slug '{slug}' not found")))?;
    Ok(Json(persona))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/personas
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreatePersona>,
) -> AppResult<(StatusCode, Json<Persona>)> {
    validate_persona(&input.slug, &input.name, input.default_mode.as_deref())?;
    let persona = PersonaRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

/// PUT /api/v1/personas/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePersona>,
) -> AppResult<Json<Persona>> {
    if let Some(mode) = &input.default_mode {
        validate_mode(mode)?;
    }
    let persona = PersonaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Persona",
            id,
        }))?;
    Ok(Json(persona))
}

/// DELETE /api/v1/personas/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PersonaRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Persona",
            id,
        }))
    }
}

/// GET /api/v1/personas/export.csv
///
/// Export all personas as CSV with columns
/// `id,name,avatar_url,feature_image_url,default_mode,system_prompt`.
pub async fn export_csv(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let personas = PersonaRepo::list(&state.pool).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for persona in &personas {
        writer
            .serialize(CsvPersonaRow {
                id: persona.slug.clone(),
                name: persona.name.clone(),
                avatar_url: persona.avatar_url.clone().unwrap_or_default(),
                feature_image_url: persona.feature_image_url.clone().unwrap_or_default(),
                default_mode: persona.default_mode.clone(),
                system_prompt: persona.system_prompt.clone(),
            })
            .map_err(|e| AppError::InternalError(format!("CSV write error: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV write error: {e}")))?;
    let csv = String::from_utf8(bytes)
        .map_err(|e| AppError::InternalError(format!("CSV encoding error: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"personas.csv\"",
            ),
        ],
        csv,
    ))
}

/// POST /api/v1/personas/import
///
/// Replace the entire persona roster with the rows in the uploaded CSV.
/// The body is raw `text/csv` using the same columns as the export.
pub async fn import_csv(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    body: String,
) -> AppResult<Json<Vec<Persona>>> {
    if body.trim().is_empty() {
        return Err(AppError::BadRequest("CSV body is empty".into()));
    }

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut inputs: Vec<CreatePersona> = Vec::new();

    for (line, record) in reader.deserialize::<CsvPersonaRow>().enumerate() {
        let row =
            record.map_err(|e| AppError::BadRequest(format!("CSV parse error: {e}")))?;

        validate_persona(&row.id, &row.name, Some(&row.default_mode)).map_err(|e| match e {
            AppError::Core(CoreError::Validation(msg)) => {
                AppError::BadRequest(format!("row {}: {msg}", line + 2))
            }
            other => other,
        })?;

        inputs.push(CreatePersona {
            slug: row.id,
            name: row.name,
            system_prompt: row.system_prompt,
            default_mode: Some(row.default_mode),
            avatar_url: none_if_empty(row.avatar_url),
            feature_image_url: none_if_empty(row.feature_image_url),
        });
    }

    if inputs.is_empty() {
        return Err(AppError::BadRequest("CSV contains no persona rows".into()));
    }

    let personas = PersonaRepo::replace_all(&state.pool, &inputs).await?;
    Ok(Json(personas))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_persona(slug: &str, name: &str, mode: Option<&str>) -> AppResult<()> {
    if slug.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "slug must not be empty".into(),
        )));
    }
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    if let Some(mode) = mode {
        validate_mode(mode)?;
    }
    Ok(())
}

fn validate_mode(mode: &str) -> AppResult<()> {
    if mode != "Debate" && mode != "Lecture" {
        return Err(AppError::Core(CoreError::Validation(format!(
            "default_mode must be 'Debate' or 'Lecture', got '{mode}'"
        ))));
    }
    Ok(())
}

fn none_if_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
