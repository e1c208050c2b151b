//! Favorite-related DTOs.

use gallery_core::ArtistSnapshot;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to save an artist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub artist_data: ArtistSnapshot,
}

/// Answer of the favorite check endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}
