//! Read/write seam between authentication and wherever user records live.

use async_trait::async_trait;
use bims_core::AppError;
use bims_models::{NewUser, User, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a user with this email already exists")]
    Conflict,
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AppError::conflict(err).with_code("EmailTaken"),
            StoreError::Database(_) => AppError::database(err),
        }
    }
}

/// Persistent user records.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// concurrently; the authenticator performs exactly one `find_by_id` per request.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
}
