//! JWT (JSON Web Token) issuing and verification.
//!
//! Tokens are HS256-signed with the shared secret from [`JwtConfig`]. The
//! verifier distinguishes exactly two failure shapes:
//!
//! - [`TokenError::Expired`]: signature is valid but `exp` has passed
//! - [`TokenError::Invalid`]: everything else (bad signature, malformed token,
//!   wrong algorithm, missing `exp`)
//!
//! The signature is always checked before the expiry, so a forged token is
//! reported as invalid even when its `exp` is in the past.
//!
//! # Example
//!
//! ```ignore
//! use bims_auth::jwt::{decode_token, issue_access_token};
//!
//! let token = issue_access_token(user.id, &jwt_config)?;
//! let claims = decode_token(&token, &jwt_config)?;
//! assert_eq!(claims.sub, user.id.to_string());
//! ```

use bims_config::JwtConfig;
use bims_core::AppError;
use bims_models::UserId;
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;

use crate::claims::Claims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token verification failed: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(err),
        }
    }
}

/// Creates an access token for `user_id` valid for `access_token_expiry` seconds.
pub fn issue_access_token(user_id: UserId, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
    };

    issue_token_with_claims(&claims, jwt_config)
}

/// Signs an explicit claim set. Used by the CLI and by tests that need
/// control over `iat`/`exp`.
pub fn issue_token_with_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
pub fn decode_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = jwt_config.leeway_seconds;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}
