//! Application state for Axum handlers.

use crate::responses::SessionCookie;
use gallery_core::HealthCheck;
use gallery_service::{ArtistService, AuthService, FavoriteService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub artist_service: Arc<dyn ArtistService>,
    pub auth_service: Arc<dyn AuthService>,
    pub favorite_service: Arc<dyn FavoriteService>,
    pub session_cookie: SessionCookie,
    /// Dependencies probed by `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        artist_service: Arc<dyn ArtistService>,
        auth_service: Arc<dyn AuthService>,
        favorite_service: Arc<dyn FavoriteService>,
        session_cookie: SessionCookie,
    ) -> Self {
        Self {
            artist_service,
            auth_service,
            favorite_service,
            session_cookie,
            health_checks: Vec::new(),
        }
    }

    /// Registers a dependency for the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
