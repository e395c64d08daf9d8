//! User domain models and DTOs.
//!
//! [`User`] is the stored record and carries the password hash. It is
//! deliberately not `Serialize`: anything that leaves the process goes through
//! [`Identity`], which has no credential field at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

/// Dashboard role of a user.
///
/// Roles are ordered: `client` < `broker` < `admin`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Client,
    Broker,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Client, UserRole::Broker, UserRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "client",
            UserRole::Broker => "broker",
            UserRole::Admin => "admin",
        }
    }

    /// Hierarchy level (higher number = more privileges)
    pub fn level(&self) -> u8 {
        match self {
            UserRole::Client => 0,
            UserRole::Broker => 1,
            UserRole::Admin => 2,
        }
    }

    pub fn at_least(&self, minimum: UserRole) -> bool {
        self.level() >= minimum.level()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(UserRole::Client),
            "broker" => Ok(UserRole::Broker),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// A user record as stored, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated identity attached to a request: a user record minus its
/// credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        let User {
            id,
            first_name,
            last_name,
            email,
            role,
            password: _,
            created_at,
            updated_at,
        } = user;

        Self {
            id,
            first_name,
            last_name,
            email,
            role,
            created_at,
            updated_at,
        }
    }
}

/// Values needed to insert a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
}

/// DTO for creating a user through the admin API.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Defaults to `client` when omitted.
    #[serde(default)]
    pub role: Option<UserRole>,
}
