//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `artist_service.rs`).

pub mod artist_service_impl;
pub mod favorite_service_impl;

pub use artist_service_impl::ArtistServiceImpl;
pub use favorite_service_impl::FavoriteServiceImpl;
