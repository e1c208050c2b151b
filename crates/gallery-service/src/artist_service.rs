//! Artist service trait.

use crate::dto::{ArtistDetail, ArtistSummary, Artwork, Category};
use async_trait::async_trait;
use gallery_core::GalleryResult;

/// Read-only façade over the catalog API.
///
/// List operations degrade to an empty list when the catalog fails; the
/// detail lookup reports the failure.
#[async_trait]
pub trait ArtistService: Send + Sync {
    /// Searches artists by name.
    ///
    /// `None` is a validation error. A blank query yields an empty list
    /// without calling the catalog.
    async fn search_artists(&self, query: Option<&str>) -> GalleryResult<Vec<ArtistSummary>>;

    /// Gets a single artist.
    async fn get_artist_details(&self, artist_id: &str) -> GalleryResult<ArtistDetail>;

    /// Lists artworks of an artist by following the artist's artworks link.
    async fn get_artist_artworks(&self, artist_id: &str) -> GalleryResult<Vec<Artwork>>;

    /// Lists the categories (genes) of an artwork.
    async fn get_artwork_categories(&self, artwork_id: &str) -> GalleryResult<Vec<Category>>;

    /// Lists artists similar to the given one.
    async fn get_similar_artists(&self, artist_id: &str) -> GalleryResult<Vec<ArtistSummary>>;
}
