//! Authentication-related DTOs.

use gallery_core::{User, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub fullname: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Trims the name and normalizes the email before validation.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            fullname: self.fullname.trim().to_string(),
            email: gallery_core::Email::normalize(&self.email),
            password: self.password,
        }
    }
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub fullname: String,
    pub email: String,
    pub profile_image_url: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email.to_string(),
            profile_image_url: user.profile_image_url,
        }
    }
}

/// Result of a successful register or login: the profile plus the session
/// token the REST layer puts in a cookie.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
    pub max_age_secs: i64,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::ValidateExt;

    fn register(fullname: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            fullname: fullname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_request_valid() {
        let request = register("Hilma af Klint", " Hilma@Example.com ", "password123").normalized();
        assert_eq!(request.email, "hilma@example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_blank_name() {
        let request = register("   ", "a@example.com", "password123").normalized();
        let err = request.validate_request().unwrap_err();
        assert!(err.to_string().contains("Full name is required"));
    }

    #[test]
    fn test_register_request_short_password() {
        let request = register("A", "a@example.com", "short");
        let err = request.validate_request().unwrap_err();
        assert!(err.to_string().contains("at least 8"));
    }

    #[test]
    fn test_register_request_invalid_email() {
        assert!(register("A", "not-an-email", "password123").validate().is_err());
    }

    #[test]
    fn test_user_profile_camel_case() {
        let profile = UserProfile {
            id: UserId::new(),
            fullname: "A".to_string(),
            email: "a@example.com".to_string(),
            profile_image_url: "https://gravatar.com/avatar/x".to_string(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("profileImageUrl").is_some());
        assert!(json.get("password").is_none());
    }
}
