//! Common test infrastructure for database integration tests.

use gallery_config::DatabaseConfig;
use gallery_repository::{DatabasePool, DatabasePoolInterface};
use std::sync::Arc;

/// Migrated in-memory SQLite database.
///
/// The pool is pinned to a single connection so every query sees the same
/// in-memory database.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh database and runs migrations.
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 3600,
            run_migrations: true,
        };

        let pool = DatabasePool::new(&config)
            .await
            .expect("Failed to open in-memory database");

        pool.run_migrations().await.expect("Failed to run migrations");

        Self { pool: Arc::new(pool) }
    }

    /// Returns a handle to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }
}
