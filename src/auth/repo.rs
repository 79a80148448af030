use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{auth::repo_types::User, errors::StoreError};

/// Persisted user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email. A miss is `Ok(None)`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Create a user. A taken email fails with `DuplicateEmail` at write time.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;
    /// Administrative promotion or demotion.
    async fn set_curator(&self, email: &str, is_curator: bool) -> Result<User, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_curator, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_curator, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        // users_email_key turns a concurrent duplicate into DuplicateEmail
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, is_curator, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn set_curator(&self, email: &str, is_curator: bool) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET is_curator = $2
             WHERE email = $1
            RETURNING id, email, password_hash, is_curator, created_at
            "#,
        )
        .bind(email)
        .bind(is_curator)
        .fetch_optional(&self.db)
        .await?;
        user.ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
pub use memory::MemoryUserStore;
