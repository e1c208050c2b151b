//! Token cache and catalog client tests against a mock Artsy API.

use gallery_catalog::{ArtsyClient, CatalogApi, CatalogApiExt, CatalogRequest, XappTokenCache, XAPP_TOKEN_HEADER};
use gallery_catalog::models::Collection;
use gallery_config::CatalogConfig;
use gallery_core::GalleryError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/api/tokens/xapp_token";

fn test_config(server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        base_url: format!("{}/api", server.uri()),
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        refresh_margin_secs: 0,
        ..CatalogConfig::default()
    }
}

fn token_response(token: &str, expires_in: i64) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "type": "xapp_token",
        "token": token,
        "expires_in": expires_in
    }))
}

fn token_cache(server: &MockServer) -> XappTokenCache {
    XappTokenCache::new(reqwest::Client::new(), &test_config(server))
}

#[tokio::test]
async fn test_token_is_reused_within_lifetime() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_json(json!({
            "client_id": "test-client",
            "client_secret": "test-secret"
        })))
        .respond_with(token_response("xapp-1", 3600))
        .expect(1)
        .mount(&server)
        .await;

    let cache = token_cache(&server);
    let first = cache.get_token().await.unwrap();
    let second = cache.get_token().await.unwrap();

    assert_eq!(first, "xapp-1");
    assert_eq!(first, second);

    let cached = cache.cached().unwrap();
    assert!(cached.expires_at > chrono::Utc::now() + chrono::Duration::minutes(59));
}

#[tokio::test]
async fn test_token_shorter_than_refresh_margin_is_reused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("brief", 30))
        .expect(1)
        .mount(&server)
        .await;

    let config = CatalogConfig {
        refresh_margin_secs: 60,
        ..test_config(&server)
    };
    let cache = XappTokenCache::new(reqwest::Client::new(), &config);

    for _ in 0..5 {
        assert_eq!(cache.get_token().await.unwrap(), "brief");
    }

    server.verify().await;
}

#[tokio::test]
async fn test_expired_token_triggers_exactly_one_new_issuance() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("short-lived", 1))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("long-lived", 3600))
        .expect(1)
        .mount(&server)
        .await;

    let cache = token_cache(&server);
    let first = cache.get_token().await.unwrap();
    let first_expiry = cache.cached().unwrap().expires_at;

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let second = cache.get_token().await.unwrap();
    let third = cache.get_token().await.unwrap();

    assert_eq!(first, "short-lived");
    assert_eq!(second, "long-lived");
    assert_eq!(second, third);
    assert!(cache.cached().unwrap().expires_at > first_expiry);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_issuance() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("shared", 3600).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(token_cache(&server));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_token().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "shared");
    }

    server.verify().await;
}

#[tokio::test]
async fn test_identity_failure_leaves_previous_token_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("stale", 1))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("identity service down"))
        .mount(&server)
        .await;

    let cache = token_cache(&server);
    cache.get_token().await.unwrap();
    let before = cache.cached().unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let err = cache.get_token().await.unwrap_err();
    assert!(matches!(err, GalleryError::UpstreamAuth(_)));
    assert_eq!(err.status_code(), 500);
    assert_eq!(cache.cached(), Some(before));
}

#[tokio::test]
async fn test_token_response_without_token_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "type": "xapp_token" })))
        .mount(&server)
        .await;

    let cache = token_cache(&server);
    let err = cache.get_token().await.unwrap_err();
    assert!(matches!(err, GalleryError::UpstreamAuth(_)));
    assert!(cache.cached().is_none());
}

#[tokio::test]
async fn test_unreachable_identity_endpoint() {
    let config = CatalogConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        ..CatalogConfig::default()
    };
    let cache = XappTokenCache::new(reqwest::Client::new(), &config);

    let err = cache.get_token().await.unwrap_err();
    assert!(matches!(err, GalleryError::UpstreamAuth(_)));
}

#[tokio::test]
async fn test_client_attaches_token_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("xapp-42", 3600))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(header(XAPP_TOKEN_HEADER, "xapp-42"))
        .and(query_param("q", "monet"))
        .and(query_param("type", "artist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": { "results": [{ "title": "Claude Monet" }] }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = ArtsyClient::from_config(&test_config(&server)).unwrap();
    let request = CatalogRequest::get("/search").query("q", "monet").query("type", "artist");

    let raw = client.request(request.clone()).await.unwrap();
    assert_eq!(raw["_embedded"]["results"][0]["title"], "Claude Monet");

    let typed: Collection = client.get_as(request).await.unwrap();
    assert_eq!(typed.into_results()[0].title.as_deref(), Some("Claude Monet"));
}

#[tokio::test]
async fn test_client_follows_absolute_link_under_base() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("xapp", 3600))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/artworks"))
        .and(query_param("artist_id", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_embedded": { "artworks": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArtsyClient::from_config(&test_config(&server)).unwrap();
    let link = format!("{}/api/artworks?artist_id=abc", server.uri());

    let body = client.request(CatalogRequest::get(link)).await.unwrap();
    assert!(body["_embedded"]["artworks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_foreign_link_refused_without_network_call() {
    let server = MockServer::start().await;
    let client = ArtsyClient::from_config(&test_config(&server)).unwrap();

    let err = client
        .request(CatalogRequest::get("https://collector.example.com/api/artworks"))
        .await
        .unwrap_err();

    assert!(matches!(err, GalleryError::UpstreamRequest { status: None, .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("xapp", 3600))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/artists/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "type": "error", "message": "Artist Not Found" })))
        .mount(&server)
        .await;

    let client = ArtsyClient::from_config(&test_config(&server)).unwrap();
    let err = client.request(CatalogRequest::get("/artists/missing")).await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(404));
    assert_eq!(err.public_message(), gallery_core::GENERIC_ERROR_MESSAGE);
    assert!(client.token_cache().cached().is_some());
}

#[tokio::test]
async fn test_unauthorized_response_invalidates_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("revoked", 3600))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/artists/abc"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = ArtsyClient::from_config(&test_config(&server)).unwrap();
    let err = client.request(CatalogRequest::get("/artists/abc")).await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(401));
    assert!(client.token_cache().cached().is_none());
}

#[tokio::test]
async fn test_undecodable_body_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response("xapp", 3600))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/genes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = ArtsyClient::from_config(&test_config(&server)).unwrap();
    let err = client.request(CatalogRequest::get("/genes")).await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(200));
}
