use axum::{Json, extract::State, http::StatusCode};
use bims_core::{AppError, ErrorResponse};
use bims_models::{CreateUserDto, Identity};
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a new user (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = Identity),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(admin_id = %admin.id()))]
pub async fn create_user(
    State(state): State<AppState>,
    admin: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<Identity>), AppError> {
    let user = UserService::create_user(state.users.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<Identity>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<Identity>>, AppError> {
    let users = UserService::get_users(state.users.as_ref()).await?;
    Ok(Json(users))
}
