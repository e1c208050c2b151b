//! Authentication middleware.

use crate::extractors::SessionRejection;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use gallery_service::AuthService;
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub auth_service: Arc<dyn AuthService>,
    pub cookie_name: String,
}

impl AuthMiddlewareState {
    /// Creates the middleware state from the application state.
    #[must_use]
    pub fn from_app_state(state: &AppState) -> Self {
        Self {
            auth_service: Arc::clone(&state.auth_service),
            cookie_name: state.session_cookie.name().to_string(),
        }
    }
}

/// Authentication middleware that validates session tokens.
///
/// The token is read from the session cookie, or from an
/// `Authorization: Bearer` header when no cookie is sent. Valid claims are
/// added to the request extensions; a rejected token leaves a
/// [`SessionRejection`] instead. Requests are never refused here, the
/// handler decides whether a session is required.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(token) = session_token(request.headers(), &state.cookie_name) {
        match state.auth_service.validate_token(&token) {
            Ok(claims) => {
                debug!("Authenticated user: {}", claims.sub);
                request.extensions_mut().insert(claims);
            }
            Err(e) => {
                debug!("Session token rejected: {}", e);
                request.extensions_mut().insert(SessionRejection::from_error(&e));
            }
        }
    }

    Ok(next.run(request).await)
}

/// Returns the session token carried by `headers`, cookie first.
#[must_use]
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
