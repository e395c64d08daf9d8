//! # BIMS Core
//!
//! Core types, errors, and utilities for the BIMS API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use bims_core::errors::AppError;
//! use bims_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Policy not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password, verify_password};
