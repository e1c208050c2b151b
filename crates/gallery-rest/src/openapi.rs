//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{DependencyStatus, HealthResponse, ReadinessResponse};
use gallery_core::{ArtistSnapshot, ErrorResponse, Favorite, FavoriteId, FieldError, UserId};
use gallery_service::{
    AddFavoriteRequest, ArtistDetail, ArtistSummary, Artwork, Category, FavoriteStatus, LoginRequest,
    MessageResponse, RegisterRequest, UserProfile,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Gallery API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gallery API",
        version = "1.0.0",
        description = "Artist search and favorites backed by the Artsy catalog",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Artist endpoints
        crate::controllers::artist_controller::search_artists,
        crate::controllers::artist_controller::get_artist_details,
        crate::controllers::artist_controller::get_artist_artworks,
        crate::controllers::artist_controller::get_artwork_categories,
        crate::controllers::artist_controller::get_similar_artists,
        // Auth endpoints
        crate::controllers::auth_controller::register,
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::get_current_user,
        crate::controllers::auth_controller::logout,
        crate::controllers::auth_controller::delete_account,
        // Favorite endpoints
        crate::controllers::favorite_controller::list_favorites,
        crate::controllers::favorite_controller::list_user_favorites,
        crate::controllers::favorite_controller::add_favorite,
        crate::controllers::favorite_controller::remove_favorite,
        crate::controllers::favorite_controller::check_favorite,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            UserId,
            FavoriteId,
            Favorite,
            ArtistSnapshot,
            ErrorResponse,
            FieldError,
            // Catalog DTOs
            ArtistSummary,
            ArtistDetail,
            Artwork,
            Category,
            // Auth DTOs
            RegisterRequest,
            LoginRequest,
            UserProfile,
            MessageResponse,
            // Favorite DTOs
            AddFavoriteRequest,
            FavoriteStatus,
            // Health
            HealthResponse,
            DependencyStatus,
            ReadinessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "artists", description = "Catalog search and lookups"),
        (name = "auth", description = "Account and session endpoints"),
        (name = "favorites", description = "Saved artists of the session user"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Registers the session cookie and the equivalent bearer header.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "token",
                    "HTTP-only session cookie set by register and login",
                ))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token sent as a bearer token"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/artists/search",
            "/api/artists/details/{id}",
            "/api/artists/similar/{artist_id}",
            "/api/auth/register",
            "/api/auth/delete-account",
            "/api/favorites",
            "/api/favorites/check/{artist_id}",
            "/ready",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_security_schemes_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("session_cookie"));
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
