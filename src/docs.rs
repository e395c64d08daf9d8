use bims_core::ErrorResponse;
use bims_models::{CreateUserDto, Identity, UserRole};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{LoginRequest, LoginResponse, SessionResponse};
use crate::modules::dashboard::model::{DashboardIndexResponse, DashboardResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::get_session,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::dashboard::controller::get_dashboard_index,
        crate::modules::dashboard::controller::get_client_dashboard,
        crate::modules::dashboard::controller::get_broker_dashboard,
        crate::modules::dashboard::controller::get_admin_dashboard,
    ),
    components(
        schemas(
            Identity,
            UserRole,
            CreateUserDto,
            LoginRequest,
            LoginResponse,
            SessionResponse,
            DashboardResponse,
            DashboardIndexResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and bearer-token identity endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Dashboard", description = "Role-gated client, broker and admin dashboards")
    ),
    info(
        title = "BIMS API",
        version = "0.1.0",
        description = "Brokerage and insurance management API. Requests authenticate with an HS256 JWT bearer token.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
