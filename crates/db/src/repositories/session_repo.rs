//! Repository for the `user_sessions` table.

use askcharlie_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{NewSession, Session};

const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a freshly issued refresh token.
    pub async fn create(pool: &PgPool, input: &NewSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Spend a refresh token: atomically revoke the live session matching
    /// `hash` and return it. `None` means the token is unknown, already
    /// rotated, or expired. One statement, so a replayed token can never win
    /// a race against the legitimate rotation.
    pub async fn consume_refresh_token(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = TRUE
             WHERE refresh_token_hash = $1
               AND is_revoked = FALSE
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session for a user (logout). Returns how many were
    /// revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE
             WHERE user_id = $1 AND is_revoked = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
