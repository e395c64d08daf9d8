//! # BIMS Config
//!
//! Configuration types for the BIMS API.
//!
//! Every structure is loaded from environment variables through `from_env()`,
//! or from an arbitrary key lookup through `from_lookup()` so tests never have to
//! mutate the process environment:
//!
//! - [`jwt`]: token signing secret, expiry and leeway
//! - [`cors`]: CORS allowed origins
//! - [`server`]: listen port and deployment environment
//! - [`database`]: which user store backs the API
//!
//! Missing required values are reported as [`ConfigError`] and abort startup.
//!
//! # Example
//!
//! ```ignore
//! use bims_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env()?;
//! let jwt = JwtConfig::from_env()?;
//! let cors = CorsConfig::from_env();
//! let store = StoreConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::StoreConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::{AppEnv, ServerConfig};

/// Reads a variable from the process environment.
pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
