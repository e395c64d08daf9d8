//! # BIMS Models
//!
//! Domain models and DTOs shared by the API, the store implementations and the CLI.
//!
//! - [`ids`]: strongly-typed identifiers
//! - [`users`]: user records, the credential-free [`Identity`], roles and DTOs

pub mod ids;
pub mod users;

pub use ids::UserId;
pub use users::{CreateUserDto, Identity, NewUser, User, UserRole};
