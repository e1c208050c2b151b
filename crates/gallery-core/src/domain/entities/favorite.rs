//! Favorite entity.

use crate::{Entity, FavoriteId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Artist fields captured when a favorite is saved, so the list can be
/// rendered without calling the catalog again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ArtistSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deathday: Option<String>,
}

/// An artist saved by a user. At most one per `(user_id, artist_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub artist_id: String,
    pub artist_data: ArtistSnapshot,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    /// Creates a new favorite stamped with the current time.
    #[must_use]
    pub fn new(user_id: UserId, artist_id: String, artist_data: ArtistSnapshot) -> Self {
        Self {
            id: FavoriteId::new(),
            user_id,
            artist_id,
            artist_data,
            created_at: Utc::now(),
        }
    }
}

impl Entity<FavoriteId> for Favorite {
    fn id(&self) -> &FavoriteId {
        &self.id
    }
}
