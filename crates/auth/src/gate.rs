//! Auth gate
//!
//! Turns a request's Authorization header into an [`Identity`] or a
//! rejection. Holds no per-request state and caches nothing: every call
//! verifies the credential and re-reads the user record.
//!
//! Domain states expose the gate via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthGate {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use uuid::Uuid;

use crate::boundary::{HeaderSource, AUTHORIZATION_HEADER};
use crate::context::Identity;
use crate::error::AuthError;
use crate::jwt::{extract_bearer_token, TokenCodec, TokenError};
use crate::store::UserStore;

#[derive(Clone)]
pub struct AuthGate {
    codec: TokenCodec,
    users: Arc<dyn UserStore>,
}

impl AuthGate {
    pub fn new(codec: TokenCodec, users: Arc<dyn UserStore>) -> Self {
        Self { codec, users }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Issue a credential for `user_id` with the configured lifetime.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.codec.issue_default(user_id)
    }

    /// Authenticate a request through its Authorization header.
    pub async fn authenticate<R>(&self, request: &R) -> Result<Identity, AuthError>
    where
        R: HeaderSource + ?Sized,
    {
        self.authenticate_header(request.header(AUTHORIZATION_HEADER))
            .await
    }

    /// Authenticate a raw Authorization header value.
    pub async fn authenticate_header(&self, header: Option<&[u8]>) -> Result<Identity, AuthError> {
        let token = extract_bearer_token(header).inspect_err(|_| {
            tracing::debug!("Request carried no bearer token");
        })?;

        let user_id = self.codec.verify(token).map_err(|reason| {
            tracing::info!(reason = %reason, "Rejected bearer token");
            AuthError::Invalid
        })?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user_id, "Failed to load user");
                AuthError::StoreUnavailable
            })?
            .ok_or_else(|| {
                tracing::info!(user_id = %user_id, "Token subject has no user record");
                AuthError::UserNotFound
            })?;

        Ok(Identity::new(user))
    }
}
