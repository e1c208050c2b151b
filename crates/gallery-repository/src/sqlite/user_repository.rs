//! SQLite user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gallery_core::{Email, GalleryError, GalleryResult, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite user repository implementation.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteUserRepository {
    /// Creates a new SQLite user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    fullname: String,
    email: String,
    password_hash: String,
    profile_image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = GalleryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::parse(&row.id)
            .map_err(|e| GalleryError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(User {
            id,
            fullname: row.fullname,
            email: Email::new_unchecked(row.email),
            password_hash: row.password_hash,
            profile_image_url: row.profile_image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_USER: &str = r#"
    SELECT id, fullname, email, password_hash, profile_image_url, created_at, updated_at
    FROM users
"#;

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: UserId) -> GalleryResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> GalleryResult<Option<User>> {
        debug!("Finding user by email");

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = ?"))
            .bind(Email::normalize(email))
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> GalleryResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(Email::normalize(email))
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, user: &User) -> GalleryResult<User> {
        debug!("Saving user: {}", user.id);

        sqlx::query(
            r#"
            INSERT INTO users (id, fullname, email, password_hash, profile_image_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.fullname)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.profile_image_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool.inner())
        .await
        .map_err(|e| match GalleryError::from(e) {
            GalleryError::Conflict(_) => GalleryError::conflict("User already exists"),
            other => other,
        })?;

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> GalleryResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
