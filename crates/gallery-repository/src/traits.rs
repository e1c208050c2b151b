//! Repository trait definitions.

use gallery_core::{Favorite, GalleryResult, User, UserId};
use async_trait::async_trait;

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> GalleryResult<Option<User>>;

    /// Finds a user by normalized email.
    async fn find_by_email(&self, email: &str) -> GalleryResult<Option<User>>;

    /// Checks if an email is already registered.
    async fn exists_by_email(&self, email: &str) -> GalleryResult<bool>;

    /// Saves a new user.
    ///
    /// Fails with [`GalleryError::Conflict`](gallery_core::GalleryError::Conflict)
    /// when the email is taken.
    async fn save(&self, user: &User) -> GalleryResult<User>;

    /// Deletes a user by ID. Their favorites go with them.
    async fn delete(&self, id: UserId) -> GalleryResult<bool>;
}

/// Favorite repository trait.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Lists a user's favorites, newest first.
    async fn find_by_user(&self, user_id: UserId) -> GalleryResult<Vec<Favorite>>;

    /// Finds one favorite by owner and artist.
    async fn find_by_user_and_artist(&self, user_id: UserId, artist_id: &str) -> GalleryResult<Option<Favorite>>;

    /// Checks whether the user has saved the artist.
    async fn exists(&self, user_id: UserId, artist_id: &str) -> GalleryResult<bool>;

    /// Saves a new favorite.
    ///
    /// Fails with [`GalleryError::Conflict`](gallery_core::GalleryError::Conflict)
    /// when the artist is already saved by this user.
    async fn save(&self, favorite: &Favorite) -> GalleryResult<Favorite>;

    /// Removes a favorite. Returns `false` when nothing matched.
    async fn delete_by_user_and_artist(&self, user_id: UserId, artist_id: &str) -> GalleryResult<bool>;

    /// Removes every favorite of a user and returns how many were removed.
    async fn delete_by_user(&self, user_id: UserId) -> GalleryResult<u64>;
}
