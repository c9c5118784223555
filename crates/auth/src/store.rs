//! User store seam
//!
//! The gate resolves credential subjects through [`UserStore`]. The
//! Postgres implementation owns the auth read query; it selects the
//! profile columns only.

use sqlx::PgPool;
use uuid::Uuid;
use wayfare_common::RepositoryError;

use crate::types::UserProfile;

/// Identity lookup used by the auth gate.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID. The returned projection never includes the
    /// password hash.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, RepositoryError>;
}

/// Postgres-backed user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        let user: Option<UserProfile> = sqlx::query_as(
            r#"
            SELECT id, name, email, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(user)
    }
}
