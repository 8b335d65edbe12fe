//! Handlers for per-owner roundtable settings (`/roundtable-settings/{owner_slug}`).
//!
//! The stored document is merged over the built-in defaults on read, so rows
//! written by older deployments that lack newer knobs still produce a
//! complete document. Writes validate the full document before persisting.

use askcharlie_core::error::CoreError;
use askcharlie_core::roundtable::{validate_settings, RoundtableSettings};
use askcharlie_db::repositories::RoundtableSettingsRepo;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/roundtable-settings/{owner_slug}
///
/// Resolve an owner's roundtable settings document, merged over the
/// built-in defaults. Reads never fail: a lookup error or an unusable
/// stored row serves the built-in defaults so the chat UI always has a
/// complete document to render.
pub async fn get_for_owner(
    State(state): State<AppState>,
    Path(owner_slug): Path<String>,
) -> Json<RoundtableSettings> {
    let settings = match RoundtableSettingsRepo::find_by_owner(&state.pool, &owner_slug).await {
        Ok(Some(row)) => {
            let stored = serde_json::json!({
                "defaults": row.defaults,
                "limits": row.limits,
                "locks": row.locks,
            });
            match merge_over_defaults(stored) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(owner_slug, error = %e, "Stored roundtable settings unusable, serving defaults");
                    RoundtableSettings::default()
                }
            }
        }
        Ok(None) => RoundtableSettings::default(),
        Err(e) => {
            tracing::warn!(owner_slug, error = %e, "Roundtable settings lookup failed, serving defaults");
            RoundtableSettings::default()
        }
    };
    Json(settings)
}

/// PUT /api/v1/roundtable-settings/{owner_slug}
///
/// Insert or replace an owner's roundtable settings document.
pub async fn upsert_for_owner(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(owner_slug): Path<String>,
    Json(input): Json<RoundtableSettings>,
) -> AppResult<Json<RoundtableSettings>> {
    validate_settings(&input)?;

    let defaults = to_json(&input.defaults)?;
    let limits = to_json(&input.limits)?;
    let locks = to_json(&input.locks)?;

    let row =
        RoundtableSettingsRepo::upsert(&state.pool, &owner_slug, &defaults, &limits, &locks)
            .await?;

    let stored = serde_json::json!({
        "defaults": row.defaults,
        "limits": row.limits,
        "locks": row.locks,
    });
    Ok(Json(merge_over_defaults(stored)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Settings serialization error: {e}")))
}

/// Deep-merge a stored (possibly partial) document over the built-in
/// defaults and deserialize the result.
fn merge_over_defaults(stored: serde_json::Value) -> AppResult<RoundtableSettings> {
    let mut base = serde_json::to_value(RoundtableSettings::default())
        .map_err(|e| AppError::InternalError(format!("Settings serialization error: {e}")))?;
    merge_json(&mut base, stored);
    serde_json::from_value(base).map_err(|e| {
        AppError::Core(CoreError::Internal(format!(
            "Stored roundtable settings are malformed: {e}"
        )))
    })
}

/// Recursive merge: objects merge key-by-key, anything else overrides.
fn merge_json(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_merges_to_builtin_defaults() {
        let merged = merge_over_defaults(serde_json::json!({})).unwrap();
        assert_eq!(merged, RoundtableSettings::default());
    }

    #[test]
    fn partial_document_keeps_unmentioned_defaults() {
        let merged = merge_over_defaults(serde_json::json!({
            "defaults": {"replies_per_round": 4}
        }))
        .unwrap();
        assert_eq!(merged.defaults.replies_per_round, 4);
        // Untouched knobs retain their built-in values.
        assert_eq!(merged.defaults.max_words_per_reply, 110);
        assert_eq!(merged.limits, RoundtableSettings::default().limits);
    }

    #[test]
    fn nested_overrides_merge_per_field() {
        let merged = merge_over_defaults(serde_json::json!({
            "limits": {"free": {"creativity": {"max": 0.8}}}
        }))
        .unwrap();
        assert_eq!(merged.limits.free.creativity.max, 0.8);
        assert_eq!(merged.limits.free.creativity.min, 0.2);
        assert_eq!(merged.limits.premium, RoundtableSettings::default().limits.premium);
    }
}
