//! In-memory repositories shared by the service tests.

use async_trait::async_trait;
use gallery_core::{Email, Favorite, GalleryError, GalleryResult, User, UserId};
use gallery_repository::{FavoriteRepository, UserRepository};
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock user repository for testing.
#[derive(Default)]
pub struct MockUserRepository {
    pub users: Mutex<HashMap<UserId, User>>,
}

impl MockUserRepository {
    pub fn with_user(user: User) -> Self {
        let repo = Self::default();
        repo.users.lock().unwrap().insert(user.id, user);
        repo
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: UserId) -> GalleryResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> GalleryResult<Option<User>> {
        let email = Email::normalize(email);
        Ok(self.users.lock().unwrap().values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> GalleryResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn save(&self, user: &User) -> GalleryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(GalleryError::conflict("User already exists"));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> GalleryResult<bool> {
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}

/// Mock favorite repository for testing.
#[derive(Default)]
pub struct MockFavoriteRepository {
    pub favorites: Mutex<Vec<Favorite>>,
}

#[async_trait]
impl FavoriteRepository for MockFavoriteRepository {
    async fn find_by_user(&self, user_id: UserId) -> GalleryResult<Vec<Favorite>> {
        let mut found: Vec<Favorite> = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_user_and_artist(&self, user_id: UserId, artist_id: &str) -> GalleryResult<Option<Favorite>> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.user_id == user_id && f.artist_id == artist_id)
            .cloned())
    }

    async fn exists(&self, user_id: UserId, artist_id: &str) -> GalleryResult<bool> {
        Ok(self.find_by_user_and_artist(user_id, artist_id).await?.is_some())
    }

    async fn save(&self, favorite: &Favorite) -> GalleryResult<Favorite> {
        let mut favorites = self.favorites.lock().unwrap();
        if favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.artist_id == favorite.artist_id)
        {
            return Err(GalleryError::conflict("Artist already in favorites"));
        }
        favorites.push(favorite.clone());
        Ok(favorite.clone())
    }

    async fn delete_by_user_and_artist(&self, user_id: UserId, artist_id: &str) -> GalleryResult<bool> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| !(f.user_id == user_id && f.artist_id == artist_id));
        Ok(favorites.len() < before)
    }

    async fn delete_by_user(&self, user_id: UserId) -> GalleryResult<u64> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| f.user_id != user_id);
        Ok((before - favorites.len()) as u64)
    }
}

/// A stored user for tests that start from an existing account.
pub fn stored_user(email: &str) -> User {
    User::new(
        "Test User".to_string(),
        Email::new(email).unwrap(),
        "not-a-real-hash".to_string(),
        String::new(),
    )
}
