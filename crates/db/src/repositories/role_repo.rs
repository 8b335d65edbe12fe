//! Repository for the seeded `roles` table.

use askcharlie_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

pub struct RoleRepo;

impl RoleRepo {
    /// Look up a role by id. Used to reject unknown role ids on user writes
    /// before the FK would turn them into opaque 500s.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name, created_at, updated_at FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
