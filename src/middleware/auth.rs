use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bims_auth::AuthFailure;
use bims_models::{Identity, UserId, UserRole};

use crate::metrics::track_auth_attempt;
use crate::state::AppState;

/// Strict mode: rejects the request unless it carries a valid bearer token for
/// an existing user. On success the [`Identity`] is placed in the request
/// extensions.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match state.authenticator.strict(req.headers()).await {
        Ok(identity) => {
            track_auth_attempt("strict", "Authenticated");
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(failure) => {
            track_auth_attempt("strict", failure.code());
            failure.into_response()
        }
    }
}

/// Permissive mode: attaches an [`Identity`] when the token checks out and
/// otherwise lets the request through untouched.
pub async fn optional_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match state.authenticator.optional(req.headers()).await {
        Some(identity) => {
            track_auth_attempt("optional", "Authenticated");
            req.extensions_mut().insert(identity);
        }
        None => track_auth_attempt("optional", "Anonymous"),
    }

    next.run(req).await
}

/// Extractor for the authenticated caller.
///
/// Reuses the identity placed by [`require_auth`] when present; otherwise it
/// runs strict authentication itself, so handlers can use it without a layer.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl CurrentUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthFailure;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(CurrentUser(identity.clone()));
        }

        let identity = state
            .authenticator
            .strict(&parts.headers)
            .await
            .inspect_err(|failure| track_auth_attempt("strict", failure.code()))?;
        track_auth_attempt("strict", "Authenticated");
        parts.extensions.insert(identity.clone());

        Ok(CurrentUser(identity))
    }
}

/// Extractor for routes behind [`optional_auth`]: the caller's identity, if any.
///
/// It only reads what the middleware attached and never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<Identity>().cloned()))
    }
}
