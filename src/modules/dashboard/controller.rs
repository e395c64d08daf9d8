use axum::Json;
use bims_core::ErrorResponse;
use bims_models::UserRole;
use tracing::instrument;

use super::model::{DashboardIndexResponse, DashboardResponse};
use super::service::DashboardService;
use crate::middleware::auth::CurrentUser;

/// Dashboards available to the caller
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboards the caller may open", body = DashboardIndexResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_dashboard_index(user: CurrentUser) -> Json<DashboardIndexResponse> {
    Json(DashboardService::index(user.0))
}

/// Client dashboard (any authenticated user)
#[utoipa::path(
    get,
    path = "/api/dashboard/client",
    responses(
        (status = 200, description = "Client dashboard", body = DashboardResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_client_dashboard(user: CurrentUser) -> Json<DashboardResponse> {
    Json(DashboardService::dashboard(UserRole::Client, user.0))
}

/// Broker dashboard (brokers and admins)
#[utoipa::path(
    get,
    path = "/api/dashboard/broker",
    responses(
        (status = 200, description = "Broker dashboard", body = DashboardResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is a client", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_broker_dashboard(user: CurrentUser) -> Json<DashboardResponse> {
    Json(DashboardService::dashboard(UserRole::Broker, user.0))
}

/// Admin dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    responses(
        (status = 200, description = "Admin dashboard", body = DashboardResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_admin_dashboard(user: CurrentUser) -> Json<DashboardResponse> {
    Json(DashboardService::dashboard(UserRole::Admin, user.0))
}
