//! Admin-console user model and DTOs.

use askcharlie_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user row joined with its role name.
///
/// Every [`crate::repositories::UserRepo`] query selects the role name
/// alongside the `users` columns, so the role is always available without a
/// second lookup. Carries the password hash; serialize [`UserResponse`]
/// instead when the row leaves the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    /// Role name resolved from the `roles` table (`"admin"`, `"superadmin"`,
    /// `"pastor"`, `"user"`).
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for inserting a user. The password arrives already hashed; the
/// handlers own strength checks and hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}

/// Partial update of a user's profile. `None` fields are left untouched.
/// Password changes go through `UserRepo::update_password` instead.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// Outward-facing user representation. No password hash, no lockout
/// bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            role_id: user.role_id,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}
