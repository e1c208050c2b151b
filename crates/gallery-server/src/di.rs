//! Dependency wiring.
//!
//! Components are built once at startup and shared through `Arc`s:
//!
//! ```text
//! DatabasePool ─┬─ SqliteUserRepository ─────┬─ AuthServiceImpl
//!               └─ SqliteFavoriteRepository ─┴─ FavoriteServiceImpl
//! ArtsyClient (XappTokenCache) ──────────────── ArtistServiceImpl
//! ```

use gallery_catalog::ArtsyClient;
use gallery_config::AppConfig;
use gallery_core::GalleryResult;
use gallery_repository::{create_pool, DatabasePool, DatabasePoolInterface, SqliteFavoriteRepository, SqliteUserRepository};
use gallery_rest::{responses::SessionCookie, AppState};
use gallery_security::{PasswordHasher, TokenProvider};
use gallery_service::{
    ArtistService, ArtistServiceImpl, AuthService, AuthServiceImpl, FavoriteService, FavoriteServiceImpl,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Every long-lived component of the application.
pub struct AppContainer {
    pub database_pool: Arc<DatabasePool>,
    pub catalog_client: Arc<ArtsyClient>,
    pub artist_service: Arc<dyn ArtistService>,
    pub auth_service: Arc<dyn AuthService>,
    pub favorite_service: Arc<dyn FavoriteService>,
    pub session_cookie: SessionCookie,
}

impl AppContainer {
    /// Connects to the database and builds all services from `config`.
    pub async fn build(config: &AppConfig) -> GalleryResult<Self> {
        let database_pool = create_pool(&config.database).await?;
        let db: Arc<dyn DatabasePoolInterface> = database_pool.clone();

        let user_repository = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let favorite_repository = Arc::new(SqliteFavoriteRepository::new(db));

        let password_hasher = Arc::new(PasswordHasher::with_cost(config.security.password_hash_cost));
        let token_provider = Arc::new(TokenProvider::new(Arc::new(config.security.clone())));

        let catalog_client = Arc::new(ArtsyClient::from_config(&config.catalog)?);
        if !config.catalog.has_credentials() {
            warn!("Catalog client credentials are not set; artist routes will fail upstream");
        }

        let artist_service: Arc<dyn ArtistService> =
            Arc::new(ArtistServiceImpl::new(catalog_client.clone(), &config.catalog));
        let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
            Arc::clone(&user_repository),
            Arc::clone(&favorite_repository),
            password_hasher,
            token_provider,
        ));
        let favorite_service: Arc<dyn FavoriteService> =
            Arc::new(FavoriteServiceImpl::new(favorite_repository, user_repository));

        info!("Application components initialized");

        Ok(Self {
            database_pool,
            catalog_client,
            artist_service,
            auth_service,
            favorite_service,
            session_cookie: SessionCookie::from_config(config),
        })
    }

    /// Builds the state shared by the HTTP handlers.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState::new(
            Arc::clone(&self.artist_service),
            Arc::clone(&self.auth_service),
            Arc::clone(&self.favorite_service),
            self.session_cookie.clone(),
        )
        .with_health_check(self.database_pool.clone())
    }

    /// Closes the database pool.
    pub async fn shutdown(&self) {
        self.database_pool.close().await;
    }
}

impl std::fmt::Debug for AppContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContainer")
            .field("database_pool", &self.database_pool)
            .field("catalog_client", &self.catalog_client)
            .finish_non_exhaustive()
    }
}
