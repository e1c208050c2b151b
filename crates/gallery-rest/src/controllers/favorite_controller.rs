//! Favorites controller. Every route requires a session.

use crate::{
    extractors::AuthenticatedUser,
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use gallery_core::Favorite;
use gallery_service::{AddFavoriteRequest, FavoriteStatus, MessageResponse};
use tracing::debug;

/// Creates the favorites router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/check/:artist_id", get(check_favorite))
        .route("/:id", get(list_user_favorites).delete(remove_favorite))
}

/// List the session user's favorites, newest first.
#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Favorites in `data`", body = [Favorite]),
        (status = 401, description = "No valid session", body = gallery_core::ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<Favorite>> {
    debug!("List favorites request: {}", user.user_id);

    let favorites = state.favorite_service.list_favorites(user.user_id).await?;
    ok(favorites)
}

/// List a user's favorites. Only the session user's own list is visible.
#[utoipa::path(
    get,
    path = "/api/favorites/{id}",
    tag = "favorites",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Favorites in `data`", body = [Favorite]),
        (status = 401, description = "No valid session", body = gallery_core::ErrorResponse),
        (status = 403, description = "Another user's list", body = gallery_core::ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_user_favorites(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Vec<Favorite>> {
    debug!("List favorites of {} requested by {}", id, user.user_id);

    let favorites = state.favorite_service.list_favorites_of(user.user_id, &id).await?;
    ok(favorites)
}

/// Save an artist.
#[utoipa::path(
    post,
    path = "/api/favorites",
    tag = "favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Saved favorite in `data`", body = Favorite),
        (status = 400, description = "Missing artist id", body = gallery_core::ErrorResponse),
        (status = 401, description = "No valid session", body = gallery_core::ErrorResponse),
        (status = 409, description = "Artist already in favorites", body = gallery_core::ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Json(request), _): WithRejection<Json<AddFavoriteRequest>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<Favorite>>), AppError> {
    debug!("Add favorite request: {} -> {}", user.user_id, request.artist_id);

    let favorite = state.favorite_service.add_favorite(user.user_id, request).await?;
    Ok(created(favorite))
}

/// Remove a saved artist.
#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    tag = "favorites",
    params(("id" = String, Path, description = "Catalog artist id")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 401, description = "No valid session", body = gallery_core::ErrorResponse),
        (status = 404, description = "Artist not in favorites", body = gallery_core::ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(artist_id): Path<String>,
) -> ApiResult<MessageResponse> {
    debug!("Remove favorite request: {} -> {}", user.user_id, artist_id);

    let message = state.favorite_service.remove_favorite(user.user_id, &artist_id).await?;
    ok(message)
}

/// Check whether an artist is saved.
#[utoipa::path(
    get,
    path = "/api/favorites/check/{artist_id}",
    tag = "favorites",
    params(("artist_id" = String, Path, description = "Catalog artist id")),
    responses(
        (status = 200, description = "Status in `data`", body = FavoriteStatus),
        (status = 401, description = "No valid session", body = gallery_core::ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn check_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(artist_id): Path<String>,
) -> ApiResult<FavoriteStatus> {
    let status = state.favorite_service.is_favorite(user.user_id, &artist_id).await?;
    ok(status)
}
