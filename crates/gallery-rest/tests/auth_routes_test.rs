//! Account and session routes.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "fullname": "Hilma af Klint", "email": " Hilma@Example.com ", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["email"], "hilma@example.com");
    assert_eq!(response.body["data"]["fullname"], "Hilma af Klint");
    assert!(response.body["data"]["profileImageUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://gravatar.com/avatar/"));
    assert!(response.body["data"].get("password").is_none());

    let set_cookie = response.set_cookie();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=3600"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    app.register("First", "dup@example.com").await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "fullname": "Second", "email": "DUP@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body["error"]["message"].as_str().unwrap().contains("Email already exists"));
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "fullname": "A", "email": "not-an-email", "password": "short" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
    let message = response.body["error"]["message"].as_str().unwrap();
    assert!(message.contains("Invalid email address"));
    assert!(message.contains("Password must be at least 8 characters"));
}

#[tokio::test]
async fn test_register_blank_name() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "fullname": "   ", "email": "a@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"]["message"].as_str().unwrap().contains("Full name is required"));
}

#[tokio::test]
async fn test_login_validation_details() {
    let app = TestApp::new().await;

    let response = app
        .send(Method::POST, "/api/auth/login", Some(json!({ "email": "a@example.com" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(response.body["error"]["message"], "Password is required");
    assert_eq!(response.body["error"]["details"][0]["field"], "password");
}

#[tokio::test]
async fn test_login_malformed_json() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.send_request(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_login_and_me() {
    let app = TestApp::new().await;
    app.register("Agnes Martin", "agnes@example.com").await;

    let login = app
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "agnes@example.com", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let cookie = login.session_cookie().unwrap();

    let me = app.send(Method::GET, "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["fullname"], "Agnes Martin");
    assert_eq!(me.body["data"]["id"], login.body["data"]["id"]);
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new().await;
    let cookie = app.register("Lee Krasner", "lee@example.com").await;
    let token = cookie.trim_start_matches("token=");

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.send_request(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "lee@example.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.register("Agnes Martin", "agnes@example.com").await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "agnes@example.com", "password": "wrong-password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["message"], "Invalid email or password");
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_requires_session() {
    let app = TestApp::new().await;

    let response = app.get("/api/auth/me").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Access denied. Please log in."));
}

#[tokio::test]
async fn test_me_with_forged_token() {
    let app = TestApp::new().await;

    let response = app
        .send(Method::GET, "/api/auth/me", None, Some("token=eyJhbGciOiJIUzI1NiJ9.e30.forged"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::new().await;

    let response = app.send(Method::POST, "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Logged out successfully");
    assert!(response.set_cookie().starts_with("token=;"));
    assert!(response.set_cookie().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_delete_account_removes_user_and_favorites() {
    let app = TestApp::new().await;
    let cookie = app.register("Ruth Asawa", "ruth@example.com").await;

    let added = app
        .send(
            Method::POST,
            "/api/favorites",
            Some(json!({ "artistId": "abc", "artistData": { "name": "Ruth Asawa" } })),
            Some(&cookie),
        )
        .await;
    assert_eq!(added.status, StatusCode::CREATED);

    let deleted = app.send(Method::DELETE, "/api/auth/delete-account", None, Some(&cookie)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["message"], "Account deleted successfully");
    assert!(deleted.set_cookie().contains("Max-Age=0"));

    let me = app.send(Method::GET, "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::NOT_FOUND);

    let login = app
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "ruth@example.com", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_account_requires_session() {
    let app = TestApp::new().await;

    let response = app.send(Method::DELETE, "/api/auth/delete-account", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
