//! # BIMS CLI
//!
//! Operator commands that work directly against a [`UserStore`]:
//! bootstrapping accounts and minting access tokens for existing users.

use anyhow::{Context, bail};
use bims_auth::{UserStore, issue_access_token};
use bims_config::JwtConfig;
use bims_core::hash_password;
use bims_models::{CreateUserDto, NewUser, User, UserId};
use validator::Validate;

/// Validates `dto`, hashes the password and inserts the user.
pub async fn create_user(users: &dyn UserStore, dto: CreateUserDto) -> anyhow::Result<User> {
    dto.validate().context("Invalid user details")?;

    let password_hash = hash_password(&dto.password).map_err(|e| e.error)?;

    let user = users
        .insert(NewUser {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            role: dto.role.unwrap_or_default(),
            password_hash,
        })
        .await
        .context("Failed to create user")?;

    Ok(user)
}

/// Issues an access token for an existing user.
///
/// Refuses unknown ids, since such a token would only ever fail with
/// `UnknownSubject`.
pub async fn issue_token(
    users: &dyn UserStore,
    user_id: UserId,
    jwt_config: &JwtConfig,
) -> anyhow::Result<String> {
    if users
        .find_by_id(user_id)
        .await
        .context("Failed to look up user")?
        .is_none()
    {
        bail!("No user with id {user_id}");
    }

    issue_access_token(user_id, jwt_config).map_err(|e| e.error)
}
