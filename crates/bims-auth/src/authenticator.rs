//! Request authentication.
//!
//! [`Authenticator::authenticate`] is the only place a request's credentials are
//! checked. It walks a fixed sequence and stops at the first failure:
//!
//! | step | failure |
//! |------|---------|
//! | `Authorization: Bearer <token>` present | [`AuthFailure::Unauthenticated`] |
//! | signature verifies | [`AuthFailure::InvalidToken`] |
//! | `exp` not passed | [`AuthFailure::TokenExpired`] |
//! | subject resolves to a user record | [`AuthFailure::UnknownSubject`] |
//!
//! The two request-facing modes are thin wrappers over it:
//!
//! - [`Authenticator::strict`] returns the failure for the caller to reject with
//! - [`Authenticator::optional`] swallows every failure and yields `None`
//!
//! The authenticator keeps no per-request state and caches nothing; each call
//! performs one store lookup.

use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bims_config::JwtConfig;
use bims_core::AppError;
use bims_models::{Identity, UserId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::jwt::{TokenError, decode_token};
use crate::store::{StoreError, UserStore};

/// Scheme marker expected at the start of the `Authorization` header. Case-sensitive.
pub const BEARER_PREFIX: &str = "Bearer ";

const INVALID_TOKEN_HINT: &str =
    "The token signature could not be verified. The signing secret may have changed; sign in again.";

#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("Missing or malformed authorization header")]
    Unauthenticated,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    TokenExpired,
    #[error("User for this token no longer exists")]
    UnknownSubject,
    #[error("Failed to resolve user")]
    StoreUnavailable(#[source] StoreError),
}

impl AuthFailure {
    /// Machine-readable reason code returned to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::Unauthenticated => "Unauthenticated",
            AuthFailure::InvalidToken => "InvalidToken",
            AuthFailure::TokenExpired => "TokenExpired",
            AuthFailure::UnknownSubject => "UnknownSubject",
            AuthFailure::StoreUnavailable(_) => "StoreUnavailable",
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AuthFailure::InvalidToken => Some(INVALID_TOKEN_HINT),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthFailure::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        let status = failure.status();
        let code = failure.code();
        let hint = failure.hint();

        let mut err = AppError::new(status, failure).with_code(code);
        if let Some(hint) = hint {
            err = err.with_hint(hint);
        }
        err
    }
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// A missing header, a non-ASCII header, a different scheme, or an empty token
/// all count as no credential presented.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthFailure::Unauthenticated)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or(AuthFailure::Unauthenticated)?;

    if token.is_empty() {
        return Err(AuthFailure::Unauthenticated);
    }

    Ok(token)
}

#[derive(Clone)]
pub struct Authenticator {
    jwt_config: Arc<JwtConfig>,
    users: Arc<dyn UserStore>,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("jwt_config", &self.jwt_config)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(jwt_config: JwtConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            jwt_config: Arc::new(jwt_config),
            users,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Verifies the request's bearer token and resolves it to an [`Identity`].
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthFailure> {
        let token = bearer_token(headers)?;

        let claims = decode_token(token, &self.jwt_config).map_err(|err| match err {
            TokenError::Expired => AuthFailure::TokenExpired,
            TokenError::Invalid(source) => {
                debug!(error = %source, "token failed verification");
                AuthFailure::InvalidToken
            }
        })?;

        // A subject that is not a user id cannot name any record.
        let user_id: UserId = claims
            .sub
            .parse()
            .map_err(|_| AuthFailure::UnknownSubject)?;

        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(Identity::from(user)),
            Ok(None) => Err(AuthFailure::UnknownSubject),
            Err(err) => Err(AuthFailure::StoreUnavailable(err)),
        }
    }

    /// Strict mode: the failure is returned so the caller can reject the request.
    pub async fn strict(&self, headers: &HeaderMap) -> Result<Identity, AuthFailure> {
        self.authenticate(headers).await.inspect_err(|failure| match failure {
            AuthFailure::Unauthenticated => debug!("request carries no bearer token"),
            AuthFailure::StoreUnavailable(err) => {
                warn!(error = ?err, "user lookup failed during authentication")
            }
            other => warn!(reason = other.code(), "authentication rejected"),
        })
    }

    /// Permissive mode: any failure yields `None` and the request carries on anonymously.
    pub async fn optional(&self, headers: &HeaderMap) -> Option<Identity> {
        match self.authenticate(headers).await {
            Ok(identity) => Some(identity),
            Err(AuthFailure::StoreUnavailable(err)) => {
                warn!(error = ?err, "user lookup failed, continuing without identity");
                None
            }
            Err(failure) => {
                debug!(reason = failure.code(), "continuing without identity");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Claims;
    use crate::jwt::{issue_access_token, issue_token_with_claims};
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use bims_models::{NewUser, User, UserRole};
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SECRET: &str = "authenticator-test-secret-0123456789";

    #[derive(Default)]
    struct StubStore {
        users: Mutex<HashMap<UserId, User>>,
        lookups: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl UserStore for StubStore {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<User>, StoreError> {
            Ok(self.users.lock().unwrap().values().cloned().collect())
        }

        async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
            unimplemented!("not needed by these tests")
        }
    }

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            first_name: "Grace".into(),
            last_name: "Mensah".into(),
            email: "grace@bims.test".into(),
            role: UserRole::Client,
            password: "$2b$12$hashhashhashhashhashha".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn setup() -> (Authenticator, Arc<StubStore>, User) {
        let user = sample_user();
        let store = Arc::new(StubStore::default());
        store.users.lock().unwrap().insert(user.id, user.clone());
        let authenticator = Authenticator::new(JwtConfig::new(SECRET), store.clone());
        (authenticator, store, user)
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn bearer(token: &str) -> HeaderMap {
        headers_with(&format!("Bearer {}", token))
    }

    fn expired_token(user_id: UserId, secret: &str) -> String {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        issue_token_with_claims(&claims, &JwtConfig::new(secret)).unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthFailure::Unauthenticated)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AuthFailure::Unauthenticated)
        ));
        assert!(matches!(
            bearer_token(&headers_with("bearer abc")),
            Err(AuthFailure::Unauthenticated)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Bearer ")),
            Err(AuthFailure::Unauthenticated)
        ));
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthenticated() {
        let (authenticator, store, _) = setup();

        let result = authenticator.strict(&HeaderMap::new()).await;

        assert!(matches!(result, Err(AuthFailure::Unauthenticated)));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_foreign_secret_is_invalid_token() {
        let (authenticator, store, user) = setup();
        let token =
            issue_access_token(user.id, &JwtConfig::new("some-other-secret-0123456789")).unwrap();

        let result = authenticator.strict(&bearer(&token)).await;

        assert!(matches!(result, Err(AuthFailure::InvalidToken)));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_token_is_invalid_token() {
        let (authenticator, _, _) = setup();
        let result = authenticator.strict(&bearer("not-a-jwt")).await;
        assert!(matches!(result, Err(AuthFailure::InvalidToken)));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (authenticator, _, user) = setup();
        let token = expired_token(user.id, SECRET);

        let result = authenticator.strict(&bearer(&token)).await;

        assert!(matches!(result, Err(AuthFailure::TokenExpired)));
    }

    #[tokio::test]
    async fn test_expired_and_forged_is_invalid_token() {
        let (authenticator, _, user) = setup();
        let token = expired_token(user.id, "forger-secret-0123456789abcdef");

        let result = authenticator.strict(&bearer(&token)).await;

        assert!(matches!(result, Err(AuthFailure::InvalidToken)));
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let (authenticator, store, _) = setup();
        let token = issue_access_token(UserId::new(), authenticator.jwt_config()).unwrap();

        let result = authenticator.strict(&bearer(&token)).await;

        assert!(matches!(result, Err(AuthFailure::UnknownSubject)));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_uuid_subject_is_unknown() {
        let (authenticator, _, _) = setup();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-42".into(),
            exp: now + 600,
            iat: now,
        };
        let token = issue_token_with_claims(&claims, authenticator.jwt_config()).unwrap();

        let result = authenticator.strict(&bearer(&token)).await;

        assert!(matches!(result, Err(AuthFailure::UnknownSubject)));
    }

    #[tokio::test]
    async fn test_valid_token_resolves_identity() {
        let (authenticator, store, user) = setup();
        let token = issue_access_token(user.id, authenticator.jwt_config()).unwrap();

        let identity = authenticator.strict(&bearer(&token)).await.unwrap();

        assert_eq!(identity, Identity::from(user));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_same_token_twice_yields_same_identity() {
        let (authenticator, store, user) = setup();
        let token = issue_access_token(user.id, authenticator.jwt_config()).unwrap();

        let first = authenticator.strict(&bearer(&token)).await.unwrap();
        let second = authenticator.strict(&bearer(&token)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_optional_swallows_every_failure() {
        let (authenticator, _, user) = setup();
        let forged = issue_access_token(user.id, &JwtConfig::new("another-secret")).unwrap();
        let expired = expired_token(user.id, SECRET);
        let orphan = issue_access_token(UserId::new(), authenticator.jwt_config()).unwrap();

        assert!(authenticator.optional(&HeaderMap::new()).await.is_none());
        assert!(authenticator.optional(&bearer(&forged)).await.is_none());
        assert!(authenticator.optional(&bearer(&expired)).await.is_none());
        assert!(authenticator.optional(&bearer(&orphan)).await.is_none());
    }

    #[tokio::test]
    async fn test_optional_returns_identity_when_valid() {
        let (authenticator, _, user) = setup();
        let token = issue_access_token(user.id, authenticator.jwt_config()).unwrap();

        let identity = authenticator.optional(&bearer(&token)).await;

        assert_eq!(identity.map(|i| i.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_store_failure() {
        let store = Arc::new(StubStore {
            fail: true,
            ..Default::default()
        });
        let authenticator = Authenticator::new(JwtConfig::new(SECRET), store);
        let token = issue_access_token(UserId::new(), authenticator.jwt_config()).unwrap();

        let strict = authenticator.strict(&bearer(&token)).await;
        assert!(matches!(strict, Err(AuthFailure::StoreUnavailable(_))));

        assert!(authenticator.optional(&bearer(&token)).await.is_none());
    }

    #[test]
    fn test_failures_map_to_distinct_responses() {
        let invalid = AppError::from(AuthFailure::InvalidToken);
        let expired = AppError::from(AuthFailure::TokenExpired);

        assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.code, Some("InvalidToken"));
        assert_eq!(expired.code, Some("TokenExpired"));
        assert_ne!(invalid.error.to_string(), expired.error.to_string());
        assert!(invalid.hint.is_some_and(|h| h.contains("signing secret")));
        assert!(expired.hint.is_none());
    }

    #[test]
    fn test_store_failure_is_server_error() {
        let err = AppError::from(AuthFailure::StoreUnavailable(StoreError::Database(
            sqlx::Error::PoolTimedOut,
        )));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
