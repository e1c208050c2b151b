//! Upstream catalog client.

use crate::XappTokenCache;
use async_trait::async_trait;
use gallery_config::CatalogConfig;
use gallery_core::{GalleryError, GalleryResult};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Header carrying the application token.
pub const XAPP_TOKEN_HEADER: &str = "X-XAPP-Token";

/// Longest upstream error body kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// A call against the catalog API.
///
/// `target` is either a path relative to the configured base URL
/// (`/artists/4d8b92b34eb68a1b2c0003f4`) or an absolute link taken from a
/// previous response's `_links`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub method: Method,
    pub target: String,
    pub query: Vec<(String, String)>,
}

impl CatalogRequest {
    /// Creates a GET request.
    #[must_use]
    pub fn get(target: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            target: target.into(),
            query: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// Access to the catalog API.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Performs an authenticated call and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`GalleryError::UpstreamAuth`] if no token could be obtained.
    /// - [`GalleryError::UpstreamRequest`] with `status: Some(..)` for a
    ///   non-success status or an undecodable body, and `status: None` for
    ///   transport failures or a refused target.
    async fn request(&self, request: CatalogRequest) -> GalleryResult<Value>;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CatalogApiExt: CatalogApi {
    /// Performs the call and deserializes the body into `T`.
    async fn get_as<T: DeserializeOwned + Send>(&self, request: CatalogRequest) -> GalleryResult<T> {
        let target = request.target.clone();
        let value = self.request(request).await?;
        serde_json::from_value(value)
            .map_err(|e| GalleryError::upstream(None, format!("unexpected payload from {target}: {e}")))
    }
}

impl<T: CatalogApi + ?Sized> CatalogApiExt for T {}

/// `reqwest`-backed client for the Artsy API.
pub struct ArtsyClient {
    http: Client,
    base_url: String,
    tokens: Arc<XappTokenCache>,
}

impl ArtsyClient {
    /// Creates a client sharing `http` and `tokens`.
    pub fn new(http: Client, base_url: &str, tokens: Arc<XappTokenCache>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Builds the HTTP client and token cache from configuration.
    pub fn from_config(config: &CatalogConfig) -> GalleryResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GalleryError::Internal(format!("Failed to create HTTP client: {e}")))?;

        let tokens = Arc::new(XappTokenCache::new(http.clone(), config));
        Ok(Self::new(http, &config.base_url, tokens))
    }

    /// Returns the token cache used by this client.
    #[must_use]
    pub fn token_cache(&self) -> &Arc<XappTokenCache> {
        &self.tokens
    }

    /// Resolves `target` into an absolute URL under the base URL.
    ///
    /// Absolute URLs are accepted only when they point below the base URL,
    /// so the application token is never sent to another host.
    pub fn resolve(&self, target: &str) -> GalleryResult<String> {
        if target.starts_with("http://") || target.starts_with("https://") {
            let rest = target.strip_prefix(&self.base_url).ok_or_else(|| foreign_target(target))?;
            if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') {
                return Ok(target.to_string());
            }
            return Err(foreign_target(target));
        }

        Ok(format!("{}/{}", self.base_url, target.trim_start_matches('/')))
    }
}

#[async_trait]
impl CatalogApi for ArtsyClient {
    async fn request(&self, request: CatalogRequest) -> GalleryResult<Value> {
        let url = self.resolve(&request.target)?;
        let token = self.tokens.get_token().await?;

        debug!(method = %request.method, url = %url, "Catalog request");

        let response = self
            .http
            .request(request.method, &url)
            .header(XAPP_TOKEN_HEADER, token)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, "Catalog request failed: {}", e);
                GalleryError::upstream(None, format!("request to {url} failed: {e}"))
            })?;

        self.handle_response(response).await
    }
}

impl ArtsyClient {
    async fn handle_response(&self, response: Response) -> GalleryResult<Value> {
        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate();
            }
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| GalleryError::upstream(Some(status.as_u16()), format!("JSON parse error: {e}")))
    }
}

impl std::fmt::Debug for ArtsyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtsyClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn map_http_error(status: StatusCode, body: &str) -> GalleryError {
    let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
    GalleryError::upstream(Some(status.as_u16()), format!("catalog returned {status}: {snippet}"))
}

fn foreign_target(target: &str) -> GalleryError {
    warn!(link = %target, "Refusing catalog link outside the configured base URL");
    GalleryError::upstream(None, format!("refusing to follow link outside the catalog API: {target}"))
}
