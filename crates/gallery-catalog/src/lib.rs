//! # Gallery Catalog
//!
//! Gateway to the Artsy public API.
//!
//! - [`XappTokenCache`] holds the application token and refreshes it when it
//!   is missing or about to expire.
//! - [`ArtsyClient`] implements [`CatalogApi`], attaching the current token
//!   to every call.
//! - [`models`] contains the HAL shapes returned by the API.

pub mod client;
pub mod models;
pub mod token_cache;

pub use client::{ArtsyClient, CatalogApi, CatalogApiExt, CatalogRequest, XAPP_TOKEN_HEADER};
pub use token_cache::{CachedToken, XappTokenCache};
