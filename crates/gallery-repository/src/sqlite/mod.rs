//! SQLite repository implementations.

mod favorite_repository;
mod user_repository;

pub use favorite_repository::SqliteFavoriteRepository;
pub use user_repository::SqliteUserRepository;
