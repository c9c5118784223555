//! Authentication gate for the Wayfare API
//!
//! Provides bearer-token issuance and verification, identity resolution
//! against a user store, an exact-match role policy, and axum extractors
//! that work with any domain state implementing `FromRef<S>` for `AuthGate`.

mod boundary;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
mod jwt;
mod middleware;
mod mock;
mod store;
mod types;

pub use boundary::{HeaderSource, ResponseSink, AUTHORIZATION_HEADER};
pub use claims::TokenClaims;
pub use config::{AuthConfig, ConfigError, MIN_SECRET_LEN};
pub use context::{require_role, AccessDecision, Identity};
pub use error::AuthError;
pub use extractors::{AdminUser, AuthUser};
pub use gate::AuthGate;
pub use jwt::{TokenCodec, TokenError, EXPIRY_LEEWAY_SECONDS};
pub use middleware::{require_admin, require_auth};
pub use mock::InMemoryUserStore;
pub use store::{PgUserStore, UserStore};
pub use types::{Role, UnknownRole, UserProfile};
