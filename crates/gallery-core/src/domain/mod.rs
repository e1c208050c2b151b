//! # Gallery Domain
//!
//! Entities and value objects owned by the application. Catalog records
//! (artists, artworks, categories) are projections of upstream data and
//! live in the service layer instead.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
