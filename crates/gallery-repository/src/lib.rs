//! # Gallery Repository
//!
//! Persistence for accounts and favorites on SQLite via SQLx.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn FavoriteRepository>
//! SqliteUserRepository / SqliteFavoriteRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite
//! ```

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::*;
pub use traits::*;
