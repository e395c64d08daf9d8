//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
///
/// The token asserts only who the caller is and until when. Role, name and
/// email are resolved from the user store on every request so a token never
/// outlives a role change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
