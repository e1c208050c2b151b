//! Domain entities.

mod favorite;
mod user;

pub use favorite::{ArtistSnapshot, Favorite};
pub use user::User;
