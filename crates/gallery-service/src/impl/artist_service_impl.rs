//! Artist service implementation backed by the catalog client.

use crate::artist_service::ArtistService;
use crate::dto::{ArtistDetail, ArtistSummary, Artwork, Category};
use async_trait::async_trait;
use gallery_catalog::models::{ArtistRecord, Collection, GeneRecord, Links, SearchResult};
use gallery_catalog::{CatalogApi, CatalogApiExt, CatalogRequest};
use gallery_config::CatalogConfig;
use gallery_core::{require_id, GalleryError, GalleryResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Artist service over any [`CatalogApi`].
pub struct ArtistServiceImpl {
    catalog: Arc<dyn CatalogApi>,
    page_size: u32,
    placeholder_image: String,
}

impl ArtistServiceImpl {
    /// Creates a new artist service.
    pub fn new(catalog: Arc<dyn CatalogApi>, config: &CatalogConfig) -> Self {
        Self {
            catalog,
            page_size: config.page_size,
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    fn image(&self, links: &Links) -> String {
        links
            .thumbnail_href()
            .map_or_else(|| self.placeholder_image.clone(), str::to_string)
    }

    fn summary_from_search(&self, result: SearchResult) -> Option<ArtistSummary> {
        let id = result.links.self_id()?.to_string();
        Some(ArtistSummary {
            id,
            name: result.title.unwrap_or_default(),
            thumbnail: self.image(&result.links),
            nationality: result.nationality,
            birthday: result.birthday,
        })
    }

    fn summary_from_artist(&self, artist: ArtistRecord) -> Option<ArtistSummary> {
        Some(ArtistSummary {
            thumbnail: self.image(&artist.links),
            id: artist.id?,
            name: artist.name.unwrap_or_default(),
            nationality: None,
            birthday: None,
        })
    }

    fn category(&self, gene: GeneRecord) -> Option<Category> {
        Some(Category {
            thumbnail: self.image(&gene.links),
            id: gene.id?,
            name: gene.name.unwrap_or_default(),
            description: gene.description.unwrap_or_default(),
        })
    }

    async fn fetch_artist(&self, artist_id: &str) -> GalleryResult<ArtistRecord> {
        self.catalog
            .get_as::<ArtistRecord>(CatalogRequest::get(format!("/artists/{artist_id}")))
            .await
    }

    async fn fetch_artworks(&self, artist_id: &str) -> GalleryResult<Vec<Artwork>> {
        let artist = self.fetch_artist(artist_id).await?;
        let Some(href) = artist.links.artworks_href() else {
            debug!(artist_id, "Artist has no artworks link");
            return Ok(Vec::new());
        };

        let collection: Collection = self.catalog.get_as(CatalogRequest::get(href)).await?;
        Ok(collection
            .into_artworks()
            .into_iter()
            .filter_map(|artwork| {
                Some(Artwork {
                    image: self.image(&artwork.links),
                    id: artwork.id?,
                    title: artwork.title.unwrap_or_default(),
                    date: artwork.date,
                    categories: artwork.category,
                })
            })
            .collect())
    }
}

#[async_trait]
impl ArtistService for ArtistServiceImpl {
    async fn search_artists(&self, query: Option<&str>) -> GalleryResult<Vec<ArtistSummary>> {
        let query = query.ok_or_else(|| GalleryError::validation("Search query is required"))?;
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank search query");
            return Ok(Vec::new());
        }

        debug!(query, "Searching artists");
        let request = CatalogRequest::get("/search")
            .query("q", query)
            .query("type", "artist")
            .query("size", self.page_size);

        let results = self.catalog.get_as::<Collection>(request).await.map(|page| {
            page.into_results()
                .into_iter()
                .filter_map(|result| self.summary_from_search(result))
                .collect()
        });
        empty_on_upstream_failure("search_artists", results)
    }

    async fn get_artist_details(&self, artist_id: &str) -> GalleryResult<ArtistDetail> {
        let artist_id = catalog_id(artist_id, "Artist ID")?;
        debug!(artist_id, "Fetching artist details");

        let artist = self.fetch_artist(artist_id).await.map_err(|e| {
            if e.upstream_status() == Some(404) {
                return GalleryError::not_found("Artist", artist_id);
            }
            warn!(artist_id, error = %e, "Failed to fetch artist details");
            e
        })?;

        let image = self.image(&artist.links);
        Ok(ArtistDetail {
            id: artist.id.unwrap_or_else(|| artist_id.to_string()),
            name: artist.name.unwrap_or_default(),
            birthday: artist.birthday,
            deathday: artist.deathday,
            nationality: artist.nationality,
            biography: artist.biography,
            thumbnail: image.clone(),
            image,
        })
    }

    async fn get_artist_artworks(&self, artist_id: &str) -> GalleryResult<Vec<Artwork>> {
        let artist_id = catalog_id(artist_id, "Artist ID")?;
        debug!(artist_id, "Fetching artist artworks");

        empty_on_upstream_failure("get_artist_artworks", self.fetch_artworks(artist_id).await)
    }

    async fn get_artwork_categories(&self, artwork_id: &str) -> GalleryResult<Vec<Category>> {
        let artwork_id = catalog_id(artwork_id, "Artwork ID")?;
        debug!(artwork_id, "Fetching artwork categories");

        let request = CatalogRequest::get("/genes")
            .query("artwork_id", artwork_id)
            .query("size", self.page_size);

        let categories = self.catalog.get_as::<Collection>(request).await.map(|page| {
            page.into_genes()
                .into_iter()
                .filter_map(|gene| self.category(gene))
                .collect()
        });
        empty_on_upstream_failure("get_artwork_categories", categories)
    }

    async fn get_similar_artists(&self, artist_id: &str) -> GalleryResult<Vec<ArtistSummary>> {
        let artist_id = catalog_id(artist_id, "Artist ID")?;
        debug!(artist_id, "Fetching similar artists");

        let request = CatalogRequest::get("/artists")
            .query("similar_to_artist_id", artist_id)
            .query("size", self.page_size);

        let artists = self.catalog.get_as::<Collection>(request).await.map(|page| {
            page.into_artists()
                .into_iter()
                .filter_map(|artist| self.summary_from_artist(artist))
                .collect()
        });
        empty_on_upstream_failure("get_similar_artists", artists)
    }
}

impl std::fmt::Debug for ArtistServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtistServiceImpl")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

/// Validates an identifier that is interpolated into a catalog path.
fn catalog_id<'a>(value: &'a str, label: &str) -> GalleryResult<&'a str> {
    let id = require_id(value, label)?;
    if id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        Ok(id)
    } else {
        Err(GalleryError::validation(format!("{label} is invalid")))
    }
}

/// Turns a catalog failure into an empty list. Other errors pass through.
fn empty_on_upstream_failure<T>(operation: &str, result: GalleryResult<Vec<T>>) -> GalleryResult<Vec<T>> {
    match result {
        Err(e) if e.is_upstream() => {
            warn!(operation, error = %e, "Catalog call failed, returning an empty list");
            Ok(Vec::new())
        }
        other => other,
    }
}
