//! # Gallery Service
//!
//! Business logic service layer for Gallery: the catalog façade, accounts
//! and favorites.

pub mod artist_service;
pub mod auth_service;
pub mod dto;
pub mod favorite_service;
pub mod gravatar;
pub mod r#impl;

#[cfg(test)]
mod test_support;

pub use artist_service::*;
pub use auth_service::*;
pub use dto::*;
pub use favorite_service::*;
pub use gravatar::gravatar_url;
pub use r#impl::{ArtistServiceImpl, FavoriteServiceImpl};
