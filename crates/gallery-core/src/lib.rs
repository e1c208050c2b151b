//! # Gallery Core
//!
//! Core types, traits, and error definitions for Gallery.
//! This crate provides the foundational abstractions shared by the catalog
//! gateway, the persistence layer and the REST surface.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
