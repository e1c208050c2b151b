//! Catalog façade controller.
//!
//! Responses are the bare simplified shapes (an array or an object) rather
//! than the `{ success, data }` envelope; errors use the standard envelope.

use crate::{responses::AppError, state::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use gallery_service::{ArtistDetail, ArtistSummary, Artwork, Category, SearchQuery};
use tracing::debug;

/// Creates the artist router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_artists))
        .route("/details/:id", get(get_artist_details))
        .route("/artworks/:id", get(get_artist_artworks))
        .route("/categories/:artwork_id", get(get_artwork_categories))
        .route("/similar/:artist_id", get(get_similar_artists))
}

/// Search artists by name.
#[utoipa::path(
    get,
    path = "/api/artists/search",
    tag = "artists",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching artists; empty when the query is blank or the catalog fails", body = [ArtistSummary]),
        (status = 400, description = "Missing `q` parameter", body = gallery_core::ErrorResponse)
    )
)]
pub async fn search_artists(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ArtistSummary>>, AppError> {
    debug!("Artist search request");

    let artists = state.artist_service.search_artists(query.q.as_deref()).await?;
    Ok(Json(artists))
}

/// Get an artist.
#[utoipa::path(
    get,
    path = "/api/artists/details/{id}",
    tag = "artists",
    params(("id" = String, Path, description = "Catalog artist id")),
    responses(
        (status = 200, description = "Artist record", body = ArtistDetail),
        (status = 400, description = "Missing artist id", body = gallery_core::ErrorResponse),
        (status = 404, description = "Unknown artist", body = gallery_core::ErrorResponse),
        (status = 500, description = "Catalog failure", body = gallery_core::ErrorResponse)
    )
)]
pub async fn get_artist_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArtistDetail>, AppError> {
    debug!("Artist details request: {}", id);

    let artist = state.artist_service.get_artist_details(&id).await?;
    Ok(Json(artist))
}

/// List an artist's artworks.
#[utoipa::path(
    get,
    path = "/api/artists/artworks/{id}",
    tag = "artists",
    params(("id" = String, Path, description = "Catalog artist id")),
    responses(
        (status = 200, description = "Artworks; empty when the artist has none or the catalog fails", body = [Artwork]),
        (status = 400, description = "Missing artist id", body = gallery_core::ErrorResponse)
    )
)]
pub async fn get_artist_artworks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Artwork>>, AppError> {
    debug!("Artist artworks request: {}", id);

    let artworks = state.artist_service.get_artist_artworks(&id).await?;
    Ok(Json(artworks))
}

/// List the categories of an artwork.
#[utoipa::path(
    get,
    path = "/api/artists/categories/{artwork_id}",
    tag = "artists",
    params(("artwork_id" = String, Path, description = "Catalog artwork id")),
    responses(
        (status = 200, description = "Categories; empty when the catalog fails", body = [Category]),
        (status = 400, description = "Missing artwork id", body = gallery_core::ErrorResponse)
    )
)]
pub async fn get_artwork_categories(
    State(state): State<AppState>,
    Path(artwork_id): Path<String>,
) -> Result<Json<Vec<Category>>, AppError> {
    debug!("Artwork categories request: {}", artwork_id);

    let categories = state.artist_service.get_artwork_categories(&artwork_id).await?;
    Ok(Json(categories))
}

/// List artists similar to an artist.
#[utoipa::path(
    get,
    path = "/api/artists/similar/{artist_id}",
    tag = "artists",
    params(("artist_id" = String, Path, description = "Catalog artist id")),
    responses(
        (status = 200, description = "Similar artists; empty when the catalog fails", body = [ArtistSummary]),
        (status = 400, description = "Missing artist id", body = gallery_core::ErrorResponse)
    )
)]
pub async fn get_similar_artists(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Result<Json<Vec<ArtistSummary>>, AppError> {
    debug!("Similar artists request: {}", artist_id);

    let artists = state.artist_service.get_similar_artists(&artist_id).await?;
    Ok(Json(artists))
}
