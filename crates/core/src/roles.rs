//! Well-known role name constants.
//!
//! These must match the seed data in `migrations/0001_create_roles.sql`.

pub const ROLE_USER: &str = "user";
pub const ROLE_PASTOR: &str = "pastor";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERADMIN: &str = "superadmin";
