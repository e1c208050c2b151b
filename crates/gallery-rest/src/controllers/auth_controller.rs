//! Authentication controller.
//!
//! Register and login answer with the profile and set the session cookie;
//! logout and account deletion clear it. Registration input is normalized
//! (trimmed name, lower-cased email) by the service before it is validated.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use gallery_service::{AuthSession, LoginRequest, MessageResponse, RegisterRequest, UserProfile};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_current_user))
        .route("/logout", post(logout))
        .route("/delete-account", delete(delete_account))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, session cookie set; profile in `data`", body = UserProfile),
        (status = 400, description = "Invalid input", body = gallery_core::ErrorResponse),
        (status = 409, description = "Email already exists", body = gallery_core::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<Response, AppError> {
    debug!("Registration request");

    let session = state.auth_service.register(request).await?;
    Ok(session_response(&state, StatusCode::CREATED, session))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set; profile in `data`", body = UserProfile),
        (status = 400, description = "Missing email or password", body = gallery_core::ErrorResponse),
        (status = 401, description = "Invalid email or password", body = gallery_core::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    debug!("Login request");

    let session = state.auth_service.login(request).await?;
    Ok(session_response(&state, StatusCode::OK, session))
}

/// Get the session user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Profile in `data`", body = UserProfile),
        (status = 401, description = "No valid session", body = gallery_core::ErrorResponse),
        (status = 404, description = "Account no longer exists", body = gallery_core::ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UserProfile> {
    debug!("Get current user: {}", user.user_id);

    let profile = state.auth_service.current_user(user.user_id).await?;
    ok(profile)
}

/// Log out. Succeeds with or without a session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    )
)]
pub async fn logout(State(state): State<AppState>) -> Response {
    debug!("Logout request");

    cleared_session_response(&state, MessageResponse::new("Logged out successfully"))
}

/// Delete the session user's account and favorites.
#[utoipa::path(
    delete,
    path = "/api/auth/delete-account",
    tag = "auth",
    responses(
        (status = 200, description = "Account deleted, session cookie cleared", body = MessageResponse),
        (status = 401, description = "No valid session", body = gallery_core::ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Response, AppError> {
    debug!("Delete account request: {}", user.user_id);

    let message = state.auth_service.delete_account(user.user_id).await?;
    Ok(cleared_session_response(&state, message))
}

fn session_response(state: &AppState, status: StatusCode, session: AuthSession) -> Response {
    let cookie = state.session_cookie.issue(&session.token, session.max_age_secs);
    (status, [(SET_COOKIE, cookie)], Json(ApiResponse::success(session.user))).into_response()
}

fn cleared_session_response(state: &AppState, message: MessageResponse) -> Response {
    let cookie = state.session_cookie.clear();
    ([(SET_COOKIE, cookie)], Json(ApiResponse::success(message))).into_response()
}
