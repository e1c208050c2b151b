//! Favorite service implementation.

use crate::dto::{AddFavoriteRequest, FavoriteStatus, MessageResponse};
use crate::favorite_service::FavoriteService;
use async_trait::async_trait;
use gallery_core::{require_id, Favorite, GalleryError, GalleryResult, UserId};
use gallery_repository::{FavoriteRepository, UserRepository};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Favorite service implementation.
pub struct FavoriteServiceImpl<F: FavoriteRepository, U: UserRepository> {
    favorite_repository: Arc<F>,
    user_repository: Arc<U>,
}

impl<F: FavoriteRepository, U: UserRepository> FavoriteServiceImpl<F, U> {
    /// Creates a new favorite service.
    pub fn new(favorite_repository: Arc<F>, user_repository: Arc<U>) -> Self {
        Self {
            favorite_repository,
            user_repository,
        }
    }
}

#[async_trait]
impl<F: FavoriteRepository + 'static, U: UserRepository + 'static> FavoriteService for FavoriteServiceImpl<F, U> {
    async fn list_favorites(&self, user_id: UserId) -> GalleryResult<Vec<Favorite>> {
        debug!("Listing favorites for user: {}", user_id);
        self.favorite_repository.find_by_user(user_id).await
    }

    async fn list_favorites_of(&self, requester: UserId, owner: &str) -> GalleryResult<Vec<Favorite>> {
        let owner = require_id(owner, "User ID")?;
        if UserId::parse(owner).ok() != Some(requester) {
            warn!("User {} asked for another user's favorites", requester);
            return Err(GalleryError::forbidden("You can only view your own favorites"));
        }
        self.list_favorites(requester).await
    }

    async fn add_favorite(&self, user_id: UserId, request: AddFavoriteRequest) -> GalleryResult<Favorite> {
        let artist_id = require_id(&request.artist_id, "Artist ID")?.to_string();

        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(GalleryError::not_found("User", user_id));
        }

        if self.favorite_repository.exists(user_id, &artist_id).await? {
            return Err(GalleryError::conflict("Artist already in favorites"));
        }

        let favorite = Favorite::new(user_id, artist_id, request.artist_data);
        let saved = self.favorite_repository.save(&favorite).await?;

        info!("User {} saved artist {}", user_id, saved.artist_id);
        Ok(saved)
    }

    async fn remove_favorite(&self, user_id: UserId, artist_id: &str) -> GalleryResult<MessageResponse> {
        let artist_id = require_id(artist_id, "Artist ID")?;

        if !self
            .favorite_repository
            .delete_by_user_and_artist(user_id, artist_id)
            .await?
        {
            return Err(GalleryError::not_found("Favorite", artist_id));
        }

        info!("User {} removed artist {}", user_id, artist_id);
        Ok(MessageResponse::new("Removed from favorites"))
    }

    async fn is_favorite(&self, user_id: UserId, artist_id: &str) -> GalleryResult<FavoriteStatus> {
        let artist_id = require_id(artist_id, "Artist ID")?;
        let is_favorite = self.favorite_repository.exists(user_id, artist_id).await?;
        Ok(FavoriteStatus { is_favorite })
    }
}

impl<F: FavoriteRepository, U: UserRepository> std::fmt::Debug for FavoriteServiceImpl<F, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteServiceImpl").finish_non_exhaustive()
    }
}
