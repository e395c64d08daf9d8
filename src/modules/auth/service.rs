use std::sync::OnceLock;

use bims_auth::{UserStore, issue_access_token};
use bims_config::JwtConfig;
use bims_core::{AppError, hash_password, verify_password};
use bims_models::Identity;

use super::model::{LoginRequest, LoginResponse};
use crate::metrics::{track_jwt_issued, track_login};

pub struct AuthService;

impl AuthService {
    /// Exchanges email and password for an access token.
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn login_user(
        users: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(user) = users.find_by_email(&dto.email).await? else {
            // Same bcrypt work as a wrong password, so timing does not reveal registered emails.
            let _ = verify_password(&dto.password, unknown_account_hash()?)?;
            track_login("UnknownEmail");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &user.password)? {
            track_login("WrongPassword");
            tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }

        let access_token = issue_access_token(user.id, jwt_config)?;
        track_jwt_issued();
        track_login("Success");
        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: Identity::from(user),
        })
    }
}

static UNKNOWN_ACCOUNT_HASH: OnceLock<String> = OnceLock::new();

fn unknown_account_hash() -> Result<&'static str, AppError> {
    if let Some(hash) = UNKNOWN_ACCOUNT_HASH.get() {
        return Ok(hash);
    }
    let hash = hash_password("bims-unknown-account")?;
    Ok(UNKNOWN_ACCOUNT_HASH.get_or_init(|| hash))
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password").with_code("InvalidCredentials")
}
