//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: strict and permissive authentication middleware plus extractors
//! - [`role`]: dashboard role gates layered on strict authentication
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::require_auth`] (strict) or [`auth::optional_auth`] (permissive)
//!    runs the [`Authenticator`](bims_auth::Authenticator)
//! 3. On success the [`Identity`](bims_models::Identity) is stored in the request
//!    extensions; strict mode rejects on failure, permissive mode continues
//! 4. Handlers read it through [`auth::CurrentUser`] or [`auth::MaybeUser`]
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::auth::{optional_auth, require_auth};
//!
//! let protected = Router::new()
//!     .route("/profile", get(profile))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//!
//! let public = Router::new()
//!     .route("/quotes", get(quotes))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));
//! ```

pub mod auth;
pub mod role;
