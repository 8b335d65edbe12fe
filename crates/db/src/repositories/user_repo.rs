//! Repository for the `users` table.
//!
//! Every read joins the role name so callers never need a second roles
//! lookup. Writes that return the row go through a CTE so the same joined
//! column list applies.

use askcharlie_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{NewUser, User, UserChanges};

/// Joined column list: `u` is the users row (or the CTE aliased as `u`),
/// `r` is the roles table.
const COLUMNS: &str = "u.id, u.username, u.email, u.password_hash, u.role_id, \
     r.name AS role, u.is_active, u.last_login_at, u.failed_login_count, \
     u.locked_until, u.created_at, u.updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row with its role name.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "WITH u AS (
                INSERT INTO users (username, email, password_hash, role_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM u JOIN roles r ON r.id = u.role_id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Username lookup for login. Case-sensitive.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id
             WHERE u.username = $1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// All users, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id
             ORDER BY u.created_at DESC"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Apply the non-`None` fields of `changes`. Returns `None` when no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UserChanges,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "WITH u AS (
                UPDATE users SET
                    username = COALESCE($2, username),
                    email = COALESCE($3, email),
                    role_id = COALESCE($4, role_id),
                    is_active = COALESCE($5, is_active)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM u JOIN roles r ON r.id = u.role_id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&changes.username)
            .bind(&changes.email)
            .bind(changes.role_id)
            .bind(changes.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a user. Returns `true` if an active row was flipped.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored password hash. Returns `true` if the row exists.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a failed login attempt and, when the new count reaches
    /// `max_attempts`, lock the account until `lock_until` in the same
    /// statement. Returns the new failure count.
    pub async fn register_failed_login(
        pool: &PgPool,
        id: DbId,
        max_attempts: i32,
        lock_until: Timestamp,
    ) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            "UPDATE users SET
                failed_login_count = failed_login_count + 1,
                locked_until = CASE
                    WHEN failed_login_count + 1 >= $2 THEN $3
                    ELSE locked_until
                END
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .bind(max_attempts)
        .bind(lock_until)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Clear lockout state and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
