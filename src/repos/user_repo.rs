/*
 * Responsibility
 * - users table access via SQLx
 * - UserStore is the seam used by auth (sign-up/sign-in + session resolution)
 * - DB errors come back as RepoError (unique violation => Conflict)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Principal persistence.
///
/// Implementations must be cheap to share (`Arc<dyn UserStore>` lives in `AppState`).
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user. Returns `RepoError::Conflict` when the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> RepoResult<UserRow>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn create(&self, username: &str, password_hash: &str) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
