//! JWT token provider for creating and validating session tokens.

use super::Claims;
use chrono::{DateTime, Duration, Utc};
use gallery_config::SecurityConfig;
use gallery_core::{GalleryError, GalleryResult, UserId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds, used for the cookie `Max-Age`.
    pub max_age_secs: i64,
}

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Returns the name of the cookie that carries the session token.
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.config.session_cookie_name
    }

    /// Session lifetime in seconds.
    #[must_use]
    pub fn session_lifetime_secs(&self) -> i64 {
        i64::try_from(self.config.jwt_expiration_secs).unwrap_or(i64::MAX)
    }

    /// Issues a session token for a user.
    pub fn generate_session_token(&self, user_id: UserId, email: &str) -> GalleryResult<SessionToken> {
        let max_age_secs = self.session_lifetime_secs();
        let expires_at = Duration::try_seconds(max_age_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| GalleryError::Configuration("Session lifetime is out of range".to_string()))?;

        let claims = Claims::new_session(
            user_id,
            email.to_string(),
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| GalleryError::Internal(format!("Failed to generate session token: {e}")))?;

        debug!("Generated session token for user {}", user_id);
        Ok(SessionToken {
            token,
            expires_at,
            max_age_secs,
        })
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> GalleryResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => GalleryError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    GalleryError::InvalidToken("Invalid token signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    GalleryError::InvalidToken("Invalid token issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    GalleryError::InvalidToken("Invalid token audience".to_string())
                }
                _ => GalleryError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            jwt_expiration_secs: 3600,
            jwt_issuer: "test-issuer".to_string(),
            jwt_audience: "test-audience".to_string(),
            ..Default::default()
        }
    }

    fn create_test_provider() -> TokenProvider {
        TokenProvider::new(Arc::new(test_config()))
    }

    #[test]
    fn test_generate_and_validate_session_token() {
        let provider = create_test_provider();
        let user_id = UserId::new();

        let session = provider.generate_session_token(user_id, "test@example.com").unwrap();
        assert_eq!(session.max_age_secs, 3600);

        let claims = provider.validate_token(&session.token).unwrap();
        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.iss, "test-issuer");
    }

    #[test]
    fn test_invalid_token() {
        let provider = create_test_provider();
        let err = provider.validate_token("invalid-token").unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let provider = create_test_provider();
        let other = TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "a-completely-different-secret-value".to_string(),
            ..test_config()
        }));

        let session = other.generate_session_token(UserId::new(), "x@example.com").unwrap();
        assert!(matches!(
            provider.validate_token(&session.token),
            Err(GalleryError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let provider = create_test_provider();
        let other = TokenProvider::new(Arc::new(SecurityConfig {
            jwt_audience: "someone-else".to_string(),
            ..test_config()
        }));

        let session = other.generate_session_token(UserId::new(), "x@example.com").unwrap();
        assert!(provider.validate_token(&session.token).is_err());
    }

    #[test]
    fn test_cookie_name() {
        assert_eq!(create_test_provider().cookie_name(), "token");
    }
}
