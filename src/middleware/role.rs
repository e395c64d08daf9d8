//! Role gates for the client, broker and admin dashboards.
//!
//! Each gate authenticates strictly (or reuses an identity already attached by
//! [`require_auth`](super::auth::require_auth)) and then answers 403 when the
//! caller's role is not allowed.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bims_core::AppError;
use bims_models::{Identity, UserRole};

use crate::metrics::track_auth_attempt;
use crate::state::AppState;

pub async fn require_roles(
    state: AppState,
    mut req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Response {
    let identity = match req.extensions().get::<Identity>().cloned() {
        Some(identity) => identity,
        None => match state.authenticator.strict(req.headers()).await {
            Ok(identity) => {
                track_auth_attempt("strict", "Authenticated");
                identity
            }
            Err(failure) => {
                track_auth_attempt("strict", failure.code());
                return failure.into_response();
            }
        },
    };

    if let Err(err) = check_any_role(&identity, allowed_roles) {
        tracing::warn!(user_id = %identity.id, role = %identity.role, "Role check failed");
        return err.into_response();
    }

    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Brokers and admins.
pub async fn require_broker(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(state, req, next, &[UserRole::Broker, UserRole::Admin]).await
}

/// Admins only.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(state, req, next, &[UserRole::Admin]).await
}

pub fn check_any_role(identity: &Identity, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&identity.role) {
        let allowed = allowed_roles
            .iter()
            .map(UserRole::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {}, but user has role: {}",
            allowed, identity.role
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use bims_models::UserId;
    use chrono::Utc;

    fn identity_with(role: UserRole) -> Identity {
        let now = Utc::now();
        Identity {
            id: UserId::new(),
            first_name: "Kemi".into(),
            last_name: "Ade".into(),
            email: "kemi@bims.test".into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_check_any_role() {
        let broker = identity_with(UserRole::Broker);

        assert!(check_any_role(&broker, &[UserRole::Broker, UserRole::Admin]).is_ok());

        let err = check_any_role(&broker, &[UserRole::Admin]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert!(err.error.to_string().contains("broker"));
    }
}
