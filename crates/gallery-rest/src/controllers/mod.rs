//! REST API controllers.

pub mod artist_controller;
pub mod auth_controller;
pub mod favorite_controller;
pub mod health_controller;
