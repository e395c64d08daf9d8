//! # BIMS Auth
//!
//! Bearer token verification and request authentication.
//!
//! - [`claims`]: the JWT claim set
//! - [`jwt`]: token issuing and verification
//! - [`store`]: the [`UserStore`] seam the authenticator resolves subjects through
//! - [`authenticator`]: the [`Authenticator`] and its [`AuthFailure`] taxonomy
//!
//! # Flow
//!
//! ```text
//! Authorization: Bearer <token>
//!         │
//!         ▼
//!   decode + verify (HS256, exp)  ──► InvalidToken / TokenExpired
//!         │
//!         ▼
//!   UserStore::find_by_id(sub)    ──► UnknownSubject
//!         │
//!         ▼
//!      Identity (record minus password)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bims_auth::Authenticator;
//!
//! let authenticator = Authenticator::new(jwt_config, users);
//!
//! // Strict: reject on failure
//! let identity = authenticator.strict(request.headers()).await?;
//!
//! // Permissive: carry on anonymously
//! let maybe_identity = authenticator.optional(request.headers()).await;
//! ```

pub mod authenticator;
pub mod claims;
pub mod jwt;
pub mod store;

// Re-export commonly used types at crate root
pub use authenticator::{AuthFailure, Authenticator, BEARER_PREFIX, bearer_token};
pub use claims::Claims;
pub use jwt::{TokenError, decode_token, issue_access_token, issue_token_with_claims};
pub use store::{StoreError, UserStore};
