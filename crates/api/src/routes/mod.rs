pub mod admin;
pub mod auth;
pub mod character;
pub mod faq;
pub mod health;
pub mod persona;
pub mod proxy;
pub mod settings;
pub mod study;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                               login (public)
/// /auth/refresh                             refresh (public)
/// /auth/logout                              logout (requires auth)
///
/// /admin/users                              list, create (admin only)
/// /admin/users/{id}                         get, update, deactivate
/// /admin/users/{id}/reset-password          reset password
/// /admin/characters                         list incl. hidden (admin only)
/// /admin/studies                            list incl. private (pastor+)
///
/// /characters                               list visible, create (admin)
/// /characters/search                        name search (?q=)
/// /characters/{id}                          get, update, delete (admin)
///
/// /personas                                 list, create (admin)
/// /personas/export.csv                      CSV export (admin)
/// /personas/import                          CSV import, replaces all (admin)
/// /personas/by-slug/{slug}                  get by slug
/// /personas/{id}                            get, update, delete (admin)
///
/// /faqs                                     list, create (admin)
/// /faqs/{id}                                get, update, delete (admin)
///
/// /studies                                  list public (?owner=), create (pastor+)
/// /studies/{id}                             get, update, delete (pastor+)
/// /studies/{study_id}/lessons               list, create (pastor+)
/// /studies/{study_id}/lessons/{id}          update, delete (pastor+)
///
/// /tiers/{owner_slug}                       get (public), upsert (admin)
/// /roundtable-settings/{owner_slug}         get (public), upsert (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user management + curator listings).
        .nest("/admin", admin::router())
        // Character roster.
        .nest("/characters", character::router())
        // Persona roster with CSV round trip.
        .nest("/personas", persona::router())
        // FAQ entries.
        .nest("/faqs", faq::router())
        // Studies and nested lessons.
        .nest("/studies", study::router())
        // Per-owner tier and roundtable settings.
        .merge(settings::router())
}
