use axum::{Json, extract::State};
use bims_core::{AppError, ErrorResponse};
use bims_models::Identity;
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, SessionResponse};
use super::service::AuthService;
use crate::middleware::auth::{CurrentUser, MaybeUser};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(state.users.as_ref(), dto, state.jwt_config()).await?;
    Ok(Json(response))
}

/// Current user resolved from the bearer token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated identity", body = Identity),
        (status = 401, description = "Unauthenticated, InvalidToken, TokenExpired or UnknownSubject", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_me(user: CurrentUser) -> Json<Identity> {
    Json(user.0)
}

/// Session probe that never rejects
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Caller identity when a valid token was supplied", body = SessionResponse),
    ),
    security(
        (),
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
pub async fn get_session(MaybeUser(identity): MaybeUser) -> Json<SessionResponse> {
    Json(SessionResponse::from(identity))
}
