//! HAL shapes returned by the catalog API.
//!
//! Every field is optional: the API omits keys freely and a record with a
//! missing field should still be mapped rather than failing the whole page.

use serde::Deserialize;

/// A `{ "href": ... }` link object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: String,
}

/// The `_links` object of a record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default)]
    pub self_link: Option<Link>,
    #[serde(default)]
    pub thumbnail: Option<Link>,
    #[serde(default)]
    pub artworks: Option<Link>,
}

impl Links {
    /// Returns the thumbnail href, if present and non-empty.
    #[must_use]
    pub fn thumbnail_href(&self) -> Option<&str> {
        self.thumbnail
            .as_ref()
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }

    /// Returns the last path segment of the `self` link.
    #[must_use]
    pub fn self_id(&self) -> Option<&str> {
        self.self_link
            .as_ref()
            .map(|link| link.href.trim_end_matches('/'))
            .and_then(|href| href.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }

    /// Returns the artworks href, if present and non-empty.
    #[must_use]
    pub fn artworks_href(&self) -> Option<&str> {
        self.artworks
            .as_ref()
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }
}

/// An entry of `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

/// An artist record from `GET /artists/{id}` or `GET /artists`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

/// An artwork record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

/// A gene (category) record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

/// The `_embedded` object of a collection response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
    #[serde(default)]
    pub artists: Option<Vec<ArtistRecord>>,
    #[serde(default)]
    pub artworks: Option<Vec<ArtworkRecord>>,
    #[serde(default)]
    pub genes: Option<Vec<GeneRecord>>,
}

/// A collection response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

impl Collection {
    /// `_embedded.results`, or empty.
    #[must_use]
    pub fn into_results(self) -> Vec<SearchResult> {
        self.embedded.and_then(|e| e.results).unwrap_or_default()
    }

    /// `_embedded.artists`, or empty.
    #[must_use]
    pub fn into_artists(self) -> Vec<ArtistRecord> {
        self.embedded.and_then(|e| e.artists).unwrap_or_default()
    }

    /// `_embedded.artworks`, or empty.
    #[must_use]
    pub fn into_artworks(self) -> Vec<ArtworkRecord> {
        self.embedded.and_then(|e| e.artworks).unwrap_or_default()
    }

    /// `_embedded.genes`, or empty.
    #[must_use]
    pub fn into_genes(self) -> Vec<GeneRecord> {
        self.embedded.and_then(|e| e.genes).unwrap_or_default()
    }
}
