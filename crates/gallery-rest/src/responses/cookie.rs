//! Session cookie header values.
//!
//! The session token travels in an HTTP-only cookie. `Secure` is added
//! outside development so browsers only send it over HTTPS.

use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration;
use gallery_config::AppConfig;

/// Builds `Set-Cookie` values for the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    /// Creates a builder for the cookie called `name`.
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    /// Reads the cookie name from the security section; `Secure` is set in production.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.security.session_cookie_name.clone(), config.app.is_production())
    }

    /// Returns the cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a cookie that stores `token` for `max_age_secs` seconds.
    #[must_use]
    pub fn issue(&self, token: &str, max_age_secs: i64) -> String {
        self.build(token, max_age_secs.max(0))
    }

    /// Returns a cookie that makes the browser drop the session.
    #[must_use]
    pub fn clear(&self) -> String {
        self.build("", 0)
    }

    fn build(&self, value: &str, max_age_secs: i64) -> String {
        Cookie::build((self.name.clone(), value.to_string()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::seconds(max_age_secs))
            .build()
            .to_string()
    }
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self::new("token", false)
    }
}
