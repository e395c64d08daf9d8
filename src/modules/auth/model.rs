use bims_models::Identity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub user: Identity,
}

/// Who the caller is, if anyone. Returned by the permissive session endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<Identity>,
}

impl From<Option<Identity>> for SessionResponse {
    fn from(user: Option<Identity>) -> Self {
        Self {
            authenticated: user.is_some(),
            user,
        }
    }
}
