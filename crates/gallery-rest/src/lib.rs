//! # Gallery REST
//!
//! REST API layer using Axum for Gallery.
//! Provides the catalog façade under `/api/artists`, cookie-session
//! authentication under `/api/auth`, per-user favorites under
//! `/api/favorites`, and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
