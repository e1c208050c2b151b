//! Test application wired from real components.
//!
//! Accounts and favorites live in a migrated in-memory SQLite database and
//! the catalog client talks to a `wiremock` server standing in for Artsy.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use gallery_catalog::ArtsyClient;
use gallery_config::{AppConfig, CatalogConfig, DatabaseConfig, SecurityConfig};
use gallery_repository::{DatabasePool, DatabasePoolInterface, SqliteFavoriteRepository, SqliteUserRepository};
use gallery_rest::{create_router, responses::SessionCookie, AppState};
use gallery_security::{PasswordHasher, TokenProvider};
use gallery_service::{ArtistServiceImpl, AuthServiceImpl, FavoriteServiceImpl};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PLACEHOLDER: &str = "/assets/shared/missing_image.png";

/// Response captured by [`TestApp::send`].
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Returns the `name=value` part of the `Set-Cookie` header.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_string)
    }

    pub fn set_cookie(&self) -> &str {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub catalog: MockServer,
    pub pool: Arc<DatabasePool>,
}

impl TestApp {
    pub async fn new() -> Self {
        let catalog = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tokens/xapp_token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "type": "xapp_token",
                "token": "test-xapp-token",
                "expires_in": 3600
            })))
            .mount(&catalog)
            .await;

        let mut config = AppConfig::default();
        config.catalog = CatalogConfig {
            base_url: format!("{}/api", catalog.uri()),
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            ..CatalogConfig::default()
        };
        config.database = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 3600,
            run_migrations: true,
        };
        config.security = SecurityConfig {
            jwt_secret: "integration-test-secret-with-enough-length".to_string(),
            password_hash_cost: 1,
            ..SecurityConfig::default()
        };

        let pool = Arc::new(DatabasePool::new(&config.database).await.unwrap());
        pool.run_migrations().await.unwrap();

        let db: Arc<dyn DatabasePoolInterface> = pool.clone();
        let users = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let favorites = Arc::new(SqliteFavoriteRepository::new(db));

        let client = Arc::new(ArtsyClient::from_config(&config.catalog).unwrap());
        let artist_service = Arc::new(ArtistServiceImpl::new(client, &config.catalog));
        let auth_service = Arc::new(AuthServiceImpl::new(
            Arc::clone(&users),
            Arc::clone(&favorites),
            Arc::new(PasswordHasher::with_cost(config.security.password_hash_cost)),
            Arc::new(TokenProvider::new(Arc::new(config.security.clone()))),
        ));
        let favorite_service = Arc::new(FavoriteServiceImpl::new(favorites, users));

        let state = AppState::new(
            artist_service,
            auth_service,
            favorite_service,
            SessionCookie::from_config(&config),
        )
        .with_health_check(pool.clone());

        Self {
            router: create_router(state, &config.server),
            catalog,
            pool,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    /// Registers an account and returns its session cookie.
    pub async fn register(&self, fullname: &str, email: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/auth/register",
                Some(json!({ "fullname": fullname, "email": email, "password": "password123" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.session_cookie().unwrap()
    }

    /// Number of calls the catalog received on `path`.
    pub async fn catalog_calls(&self, path: &str) -> usize {
        self.catalog
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == path)
            .count()
    }
}
