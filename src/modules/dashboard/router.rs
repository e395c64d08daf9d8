use axum::{Router, middleware, routing::get};

use super::controller::{
    get_admin_dashboard, get_broker_dashboard, get_client_dashboard, get_dashboard_index,
};
use crate::middleware::auth::require_auth;
use crate::middleware::role::{require_admin, require_broker};
use crate::state::AppState;

pub fn init_dashboard_router(state: AppState) -> Router<AppState> {
    let any_user = Router::new()
        .route("/", get(get_dashboard_index))
        .route("/client", get(get_client_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let broker = Router::new()
        .route("/broker", get(get_broker_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_broker));

    let admin = Router::new()
        .route("/admin", get(get_admin_dashboard))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    any_user.merge(broker).merge(admin)
}
