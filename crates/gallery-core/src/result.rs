//! Result type aliases for Gallery.

use crate::GalleryError;

/// A specialized `Result` type for Gallery operations.
pub type GalleryResult<T> = Result<T, GalleryError>;
