//! # Gallery Security
//!
//! Session tokens (HS256 JWT) and Argon2 password hashing for Gallery.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
