//! Application token cache for the catalog API.
//!
//! The catalog authenticates applications with a client-credentials exchange
//! that yields an `X-XAPP-Token`. One token is shared by every request until
//! it comes within `refresh_margin` of its expiry. The margin never exceeds
//! half of a token's declared lifetime.
//!
//! Reads take a short `parking_lot` read lock. Refreshes are serialized by an
//! async mutex and the cache is re-checked after acquiring it, so callers
//! that race on an expired token trigger a single issuance.

use chrono::{DateTime, Duration, Utc};
use gallery_config::CatalogConfig;
use gallery_core::{GalleryError, GalleryResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A token together with the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
    /// Instant after which the token is replaced on the next read.
    pub refresh_at: DateTime<Utc>,
}

impl CachedToken {
    /// Creates an entry issued at `now`.
    ///
    /// The refresh margin is capped at half the token's lifetime, so a token
    /// declared to live no longer than the margin is still reused.
    #[must_use]
    pub fn new(value: String, now: DateTime<Utc>, expires_at: DateTime<Utc>, margin: Duration) -> Self {
        let margin = margin.min((expires_at - now) / 2).max(Duration::zero());
        let refresh_at = expires_at.checked_sub_signed(margin).unwrap_or(expires_at);
        Self {
            value,
            expires_at,
            refresh_at,
        }
    }

    /// True while `now` is before the refresh point.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.refresh_at > now
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<String>,
}

impl TokenResponse {
    /// Resolves the expiry: `expires_in`, then `expires_at`, then the default.
    fn expiry(&self, now: DateTime<Utc>, default_lifetime: Duration) -> DateTime<Utc> {
        if let Some(seconds) = self.expires_in.filter(|s| *s > 0) {
            return after(now, Duration::try_seconds(seconds).unwrap_or(Duration::MAX));
        }

        self.expires_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc))
            .filter(|at| *at > now)
            .unwrap_or_else(|| after(now, default_lifetime))
    }
}

/// Process-wide cache of the catalog application token.
pub struct XappTokenCache {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    default_lifetime: Duration,
    refresh_margin: Duration,
    current: RwLock<Option<CachedToken>>,
    refresh: Mutex<()>,
}

impl XappTokenCache {
    /// Creates an empty cache that issues tokens from `config.token_url()`.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            http,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            default_lifetime: to_duration(config.default_token_lifetime_secs),
            refresh_margin: to_duration(config.refresh_margin_secs),
            current: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Returns a valid token, issuing a new one when none is cached or the
    /// cached one is about to expire.
    ///
    /// # Errors
    ///
    /// [`GalleryError::UpstreamAuth`] when the identity endpoint cannot be
    /// reached, answers with a non-success status, or omits the token. The
    /// previously cached entry is left as it was.
    pub async fn get_token(&self) -> GalleryResult<String> {
        if let Some(token) = self.fresh_value() {
            return Ok(token);
        }

        let _guard = self.refresh.lock().await;

        if let Some(token) = self.fresh_value() {
            debug!("Catalog token refreshed by a concurrent caller");
            return Ok(token);
        }

        let issued = self.issue().await?;
        let value = issued.value.clone();
        *self.current.write() = Some(issued);
        Ok(value)
    }

    /// Drops the cached token so the next call issues a new one.
    pub fn invalidate(&self) {
        if self.current.write().take().is_some() {
            debug!("Catalog token invalidated");
        }
    }

    /// Returns a snapshot of the cached token, if any.
    #[must_use]
    pub fn cached(&self) -> Option<CachedToken> {
        self.current.read().clone()
    }

    fn fresh_value(&self) -> Option<String> {
        let now = Utc::now();
        self.current
            .read()
            .as_ref()
            .filter(|token| token.is_fresh(now))
            .map(|token| token.value.clone())
    }

    async fn issue(&self) -> GalleryResult<CachedToken> {
        debug!(url = %self.token_url, "Requesting catalog application token");

        let response = self
            .http
            .post(&self.token_url)
            .json(&TokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Catalog token request failed: {}", e);
                GalleryError::UpstreamAuth(format!("token request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Catalog identity endpoint rejected the credentials");
            return Err(GalleryError::UpstreamAuth(format!("identity endpoint returned {status}")));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| GalleryError::UpstreamAuth(format!("malformed token response: {e}")))?;

        let now = Utc::now();
        let expires_at = body.expiry(now, self.default_lifetime);
        let value = body
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| GalleryError::UpstreamAuth("token response did not contain a token".to_string()))?;

        let token = CachedToken::new(value, now, expires_at, self.refresh_margin);
        info!(%expires_at, refresh_at = %token.refresh_at, "Issued catalog application token");
        Ok(token)
    }
}

impl std::fmt::Debug for XappTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XappTokenCache")
            .field("token_url", &self.token_url)
            .field("expires_at", &self.current.read().as_ref().map(|t| t.expires_at))
            .finish_non_exhaustive()
    }
}

fn to_duration(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

fn after(now: DateTime<Utc>, lifetime: Duration) -> DateTime<Utc> {
    now.checked_add_signed(lifetime).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
