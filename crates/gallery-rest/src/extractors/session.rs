//! Session extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use gallery_core::{GalleryError, UserId};
use gallery_security::Claims;

/// Message returned when a protected route is called without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Access denied. Please log in.";

/// Why the auth middleware refused the presented token.
///
/// Stored in the request extensions in place of [`Claims`] so protected
/// handlers can tell an expired session from a forged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    Expired,
    Invalid,
}

impl SessionRejection {
    /// Classifies a token validation failure.
    #[must_use]
    pub fn from_error(error: &GalleryError) -> Self {
        match error {
            GalleryError::TokenExpired => Self::Expired,
            _ => Self::Invalid,
        }
    }

    fn into_error(self) -> GalleryError {
        match self {
            Self::Expired => GalleryError::TokenExpired,
            Self::Invalid => GalleryError::InvalidToken("Please login again".to_string()),
        }
    }
}

/// Extractor for the session user.
///
/// The claims are placed in the request extensions by
/// [`auth_middleware`](crate::middleware::auth_middleware); this extractor
/// only reads them.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub claims: Claims,
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.claims
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(claims) = parts.extensions.get::<Claims>().cloned() else {
            let error = parts
                .extensions
                .get::<SessionRejection>()
                .map_or_else(|| GalleryError::unauthorized(LOGIN_REQUIRED_MESSAGE), |r| r.into_error());
            return Err(AppError(error));
        };

        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError(SessionRejection::Invalid.into_error()))?;

        Ok(AuthenticatedUser { user_id, claims })
    }
}
