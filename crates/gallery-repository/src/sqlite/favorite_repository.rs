//! SQLite favorite repository implementation.

use crate::{traits::FavoriteRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gallery_core::{ArtistSnapshot, Favorite, FavoriteId, GalleryError, GalleryResult, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite favorite repository implementation.
#[derive(Clone)]
pub struct SqliteFavoriteRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteFavoriteRepository {
    /// Creates a new SQLite favorite repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a favorite. The artist snapshot is
/// flattened into nullable columns.
#[derive(Debug, FromRow)]
struct FavoriteRow {
    id: String,
    user_id: String,
    artist_id: String,
    artist_name: Option<String>,
    artist_image: Option<String>,
    nationality: Option<String>,
    birthday: Option<String>,
    deathday: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FavoriteRow> for Favorite {
    type Error = GalleryError;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        let id = FavoriteId::parse(&row.id)
            .map_err(|e| GalleryError::Internal(format!("Invalid favorite id in database: {}", e)))?;
        let user_id = UserId::parse(&row.user_id)
            .map_err(|e| GalleryError::Internal(format!("Invalid user id in database: {}", e)))?;

        Ok(Favorite {
            id,
            user_id,
            artist_id: row.artist_id,
            artist_data: ArtistSnapshot {
                name: row.artist_name,
                image: row.artist_image,
                nationality: row.nationality,
                birthday: row.birthday,
                deathday: row.deathday,
            },
            created_at: row.created_at,
        })
    }
}

const SELECT_FAVORITE: &str = r#"
    SELECT id, user_id, artist_id, artist_name, artist_image, nationality, birthday, deathday, created_at
    FROM favorites
"#;

#[async_trait]
impl FavoriteRepository for SqliteFavoriteRepository {
    async fn find_by_user(&self, user_id: UserId) -> GalleryResult<Vec<Favorite>> {
        debug!("Listing favorites for user: {}", user_id);

        // Ids are UUIDv7, so they break ties between equal timestamps in insertion order.
        let rows = sqlx::query_as::<_, FavoriteRow>(&format!(
            "{SELECT_FAVORITE} WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Favorite::try_from).collect()
    }

    async fn find_by_user_and_artist(&self, user_id: UserId, artist_id: &str) -> GalleryResult<Option<Favorite>> {
        let row = sqlx::query_as::<_, FavoriteRow>(&format!(
            "{SELECT_FAVORITE} WHERE user_id = ? AND artist_id = ?"
        ))
        .bind(user_id.to_string())
        .bind(artist_id)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Favorite::try_from).transpose()
    }

    async fn exists(&self, user_id: UserId, artist_id: &str) -> GalleryResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = ? AND artist_id = ?")
            .bind(user_id.to_string())
            .bind(artist_id)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, favorite: &Favorite) -> GalleryResult<Favorite> {
        debug!("Saving favorite {} for user {}", favorite.artist_id, favorite.user_id);

        let data = &favorite.artist_data;
        sqlx::query(
            r#"
            INSERT INTO favorites (id, user_id, artist_id, artist_name, artist_image,
                                   nationality, birthday, deathday, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(favorite.id.to_string())
        .bind(favorite.user_id.to_string())
        .bind(&favorite.artist_id)
        .bind(&data.name)
        .bind(&data.image)
        .bind(&data.nationality)
        .bind(&data.birthday)
        .bind(&data.deathday)
        .bind(favorite.created_at)
        .execute(self.pool.inner())
        .await
        .map_err(|e| match GalleryError::from(e) {
            GalleryError::Conflict(_) => GalleryError::conflict("Artist already in favorites"),
            other => other,
        })?;

        Ok(favorite.clone())
    }

    async fn delete_by_user_and_artist(&self, user_id: UserId, artist_id: &str) -> GalleryResult<bool> {
        debug!("Removing favorite {} for user {}", artist_id, user_id);

        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND artist_id = ?")
            .bind(user_id.to_string())
            .bind(artist_id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: UserId) -> GalleryResult<u64> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}
