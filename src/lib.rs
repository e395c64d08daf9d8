//! # BIMS API
//!
//! HTTP backend for the BIMS brokerage and insurance management platform,
//! built with Axum. Every protected request is authenticated with an HS256
//! JWT bearer token whose `sub` claim names a user in the [`UserStore`].
//!
//! ## Request authentication
//!
//! A single verification routine,
//! [`Authenticator::authenticate`](bims_auth::Authenticator::authenticate),
//! returns a tagged result. Two thin wrappers sit on top of it:
//!
//! - **strict** ([`middleware::auth::require_auth`],
//!   [`middleware::auth::CurrentUser`]): rejects with `Unauthenticated`,
//!   `InvalidToken`, `TokenExpired` or `UnknownSubject`
//! - **permissive** ([`middleware::auth::optional_auth`],
//!   [`middleware::auth::MaybeUser`]): always continues, with or without an
//!   identity
//!
//! The signing secret comes from `JWT_SECRET` and is injected into the
//! authenticator at startup. There is no fallback secret.
//!
//! ## Layout
//!
//! ```text
//! crates/
//! ├── bims-core/     # AppError, ErrorResponse, bcrypt helpers
//! ├── bims-config/   # JWT, CORS, server and store configuration
//! ├── bims-models/   # UserId, UserRole, User, Identity, DTOs
//! ├── bims-auth/     # Claims, token issue/verify, Authenticator, UserStore
//! ├── bims-db/       # Postgres and in-memory UserStore implementations
//! └── bims-cli/      # create-user / issue-token admin commands
//! src/
//! ├── middleware/    # strict/permissive auth layers and role gates
//! └── modules/       # auth, users, dashboard feature modules
//! ```
//!
//! ## Roles
//!
//! | Role | Dashboards |
//! |------|------------|
//! | client | client |
//! | broker | client, broker |
//! | admin | client, broker, admin |
//!
//! ## Modules
//!
//! - [`docs`]: OpenAPI documentation setup
//! - [`logging`]: Tracing initialisation and request logging
//! - [`metrics`]: Prometheus metrics endpoint
//! - [`middleware`]: Authentication and authorization middleware
//! - [`modules`]: Feature modules (auth, users, dashboard)
//! - [`router`]: Main application router
//! - [`state`]: Shared application state
//! - [`validator`]: Request validation utilities
//!
//! [`UserStore`]: bims_auth::UserStore

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use bims_auth;
pub use bims_config;
pub use bims_core;
pub use bims_db;
pub use bims_models;
