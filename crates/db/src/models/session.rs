//! Refresh-token session model.

use askcharlie_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_sessions` table.
///
/// Only the SHA-256 digest of the refresh token is stored; the plaintext
/// exists solely in the response that handed it to the client.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for opening a session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
