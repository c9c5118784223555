//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by a Wayfare bearer credential.
///
/// Carries no role. Privileges come from the live user record on every
/// request.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (seconds since epoch)
    pub iat: u64,
    /// Expires at (seconds since epoch)
    pub exp: u64,
}
