//! Authentication service implementation.

use crate::dto::{AuthSession, LoginRequest, MessageResponse, RegisterRequest, UserProfile};
use crate::gravatar::gravatar_url;
use async_trait::async_trait;
use gallery_core::{Email, GalleryError, GalleryResult, User, UserId, ValidateExt};
use gallery_repository::{FavoriteRepository, UserRepository};
use gallery_security::{Claims, PasswordHasher, TokenProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new user and opens a session.
    async fn register(&self, request: RegisterRequest) -> GalleryResult<AuthSession>;

    /// Logs in a user and opens a session.
    async fn login(&self, request: LoginRequest) -> GalleryResult<AuthSession>;

    /// Validates a session token and returns its claims.
    fn validate_token(&self, token: &str) -> GalleryResult<Claims>;

    /// Gets the profile of the session user.
    async fn current_user(&self, user_id: UserId) -> GalleryResult<UserProfile>;

    /// Deletes the account and every favorite it owns.
    async fn delete_account(&self, user_id: UserId) -> GalleryResult<MessageResponse>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl<U: UserRepository, F: FavoriteRepository> {
    user_repository: Arc<U>,
    favorite_repository: Arc<F>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl<U: UserRepository, F: FavoriteRepository> AuthServiceImpl<U, F> {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<U>,
        favorite_repository: Arc<F>,
        password_hasher: Arc<PasswordHasher>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_repository,
            favorite_repository,
            password_hasher,
            token_provider,
        }
    }

    fn open_session(&self, user: User) -> GalleryResult<AuthSession> {
        let session = self
            .token_provider
            .generate_session_token(user.id, user.email.as_str())?;

        Ok(AuthSession {
            user: UserProfile::from(user),
            token: session.token,
            max_age_secs: session.max_age_secs,
        })
    }
}

#[async_trait]
impl<U: UserRepository + 'static, F: FavoriteRepository + 'static> AuthService for AuthServiceImpl<U, F> {
    async fn register(&self, request: RegisterRequest) -> GalleryResult<AuthSession> {
        let request = request.normalized();
        debug!("Registration attempt");

        request.validate_request()?;

        if self.user_repository.exists_by_email(&request.email).await? {
            return Err(GalleryError::conflict("Email already exists"));
        }

        let email = Email::new(&request.email).map_err(|e| GalleryError::Validation(e.to_string()))?;
        let password_hash = self.password_hasher.hash(&request.password)?;
        let profile_image_url = gravatar_url(email.as_str());

        let user = User::new(request.fullname, email, password_hash, profile_image_url);
        let saved_user = self.user_repository.save(&user).await?;

        info!("User registered: {}", saved_user.id);
        self.open_session(saved_user)
    }

    async fn login(&self, request: LoginRequest) -> GalleryResult<AuthSession> {
        request.validate_request()?;

        let Some(user) = self.user_repository.find_by_email(&request.email).await? else {
            self.password_hasher.verify_decoy(&request.password)?;
            warn!("Login failed: unknown email");
            return Err(GalleryError::InvalidCredentials);
        };

        if !self.password_hasher.verify(&request.password, &user.password_hash)? {
            warn!("Login failed: invalid password - {}", user.id);
            return Err(GalleryError::InvalidCredentials);
        }

        info!("User logged in: {}", user.id);
        self.open_session(user)
    }

    fn validate_token(&self, token: &str) -> GalleryResult<Claims> {
        self.token_provider.validate_token(token)
    }

    async fn current_user(&self, user_id: UserId) -> GalleryResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| GalleryError::not_found("User", user_id))?;

        Ok(UserProfile::from(user))
    }

    async fn delete_account(&self, user_id: UserId) -> GalleryResult<MessageResponse> {
        let removed = self.favorite_repository.delete_by_user(user_id).await?;
        let deleted = self.user_repository.delete(user_id).await?;

        if deleted {
            info!(favorites = removed, "Account deleted: {}", user_id);
        } else {
            debug!("Account {} was already gone", user_id);
        }
        Ok(MessageResponse::new("Account deleted successfully"))
    }
}

impl<U: UserRepository, F: FavoriteRepository> std::fmt::Debug for AuthServiceImpl<U, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}
