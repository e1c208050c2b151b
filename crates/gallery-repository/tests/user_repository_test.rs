//! Integration tests for SqliteUserRepository against in-memory SQLite.

mod common;

use common::TestDatabase;
use gallery_core::{Email, GalleryError, User, UserId};
use gallery_repository::{DatabasePoolInterface, SqliteUserRepository, UserRepository};

fn create_test_user(fullname: &str, email: &str) -> User {
    User::new(
        fullname.to_string(),
        Email::new(email).unwrap(),
        "hashed_password_123".to_string(),
        format!("https://gravatar.com/avatar/{fullname}"),
    )
}

#[tokio::test]
async fn test_save_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = SqliteUserRepository::new(db.pool());

    let user = create_test_user("Mary Cassatt", "mary@example.com");
    let saved = repo.save(&user).await.expect("Failed to save user");
    assert_eq!(saved.fullname, "Mary Cassatt");

    let found = repo
        .find_by_id(user.id)
        .await
        .expect("Failed to find user")
        .expect("User not found");

    assert_eq!(found.id, user.id);
    assert_eq!(found.email.as_str(), "mary@example.com");
    assert_eq!(found.password_hash, "hashed_password_123");
    assert_eq!(found.profile_image_url, user.profile_image_url);
    assert_eq!(found.created_at.timestamp_micros(), user.created_at.timestamp_micros());
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = SqliteUserRepository::new(db.pool());

    let result = repo.find_by_id(UserId::new()).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_by_email_is_case_insensitive() {
    let db = TestDatabase::new().await;
    let repo = SqliteUserRepository::new(db.pool());

    let user = create_test_user("Georgia", "georgia@example.com");
    repo.save(&user).await.unwrap();

    let found = repo
        .find_by_email("  GEORGIA@example.com ")
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found.id, user.id);

    assert!(repo.exists_by_email("georgia@example.com").await.unwrap());
    assert!(!repo.exists_by_email("nobody@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let db = TestDatabase::new().await;
    let repo = SqliteUserRepository::new(db.pool());

    repo.save(&create_test_user("First", "same@example.com")).await.unwrap();
    let err = repo
        .save(&create_test_user("Second", "same@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, GalleryError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_user() {
    let db = TestDatabase::new().await;
    let repo = SqliteUserRepository::new(db.pool());

    let user = create_test_user("Temporary", "temp@example.com");
    repo.save(&user).await.unwrap();

    assert!(repo.delete(user.id).await.unwrap());
    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    assert!(!repo.delete(user.id).await.unwrap());
}

#[tokio::test]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.expect("Health check failed");
}
