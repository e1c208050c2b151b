//! Favorite service trait.

use crate::dto::{AddFavoriteRequest, FavoriteStatus, MessageResponse};
use async_trait::async_trait;
use gallery_core::{Favorite, GalleryResult, UserId};

/// Per-user list of saved artists.
#[async_trait]
pub trait FavoriteService: Send + Sync {
    /// Lists the user's favorites, newest first.
    async fn list_favorites(&self, user_id: UserId) -> GalleryResult<Vec<Favorite>>;

    /// Lists the favorites of `owner`, which must be the requesting user.
    async fn list_favorites_of(&self, requester: UserId, owner: &str) -> GalleryResult<Vec<Favorite>>;

    /// Saves an artist for the user.
    async fn add_favorite(&self, user_id: UserId, request: AddFavoriteRequest) -> GalleryResult<Favorite>;

    /// Removes a saved artist.
    async fn remove_favorite(&self, user_id: UserId, artist_id: &str) -> GalleryResult<MessageResponse>;

    /// Reports whether the user has saved the artist.
    async fn is_favorite(&self, user_id: UserId, artist_id: &str) -> GalleryResult<FavoriteStatus>;
}
