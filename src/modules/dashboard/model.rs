use bims_models::{Identity, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A role-scoped dashboard as seen by the current viewer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    /// Which dashboard this is
    pub dashboard: UserRole,
    pub viewer: Identity,
    pub sections: Vec<String>,
}

/// The dashboards the viewer is allowed to open.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardIndexResponse {
    pub viewer: Identity,
    pub available: Vec<UserRole>,
}
