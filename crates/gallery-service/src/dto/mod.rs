//! Data Transfer Objects (DTOs).

mod artist_dto;
mod auth_dto;
mod favorite_dto;

pub use artist_dto::*;
pub use auth_dto::*;
pub use favorite_dto::*;
