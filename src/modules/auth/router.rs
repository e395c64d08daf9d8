use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{get_me, get_session, login_user};
use crate::middleware::auth::optional_auth;
use crate::state::AppState;

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let session = Router::new()
        .route("/session", get(get_session))
        .route_layer(middleware::from_fn_with_state(state, optional_auth));

    Router::new()
        .route("/login", post(login_user))
        .route("/me", get(get_me))
        .merge(session)
}
