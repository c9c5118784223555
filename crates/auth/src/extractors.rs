//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthGate: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::context::{require_role, Identity};
use crate::error::AuthError;
use crate::gate::AuthGate;
use crate::types::Role;

/// Authenticated user extractor.
///
/// Reuses the identity attached by [`crate::require_auth`] when the route
/// sits behind that middleware; otherwise authenticates the request itself.
#[derive(Debug)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let gate = AuthGate::from_ref(state);
        let identity = gate.authenticate(&parts.headers).await?;

        Ok(AuthUser(identity))
    }
}

/// Admin-only authenticated user extractor.
///
/// Like `AuthUser` but rejects any identity whose live role is not
/// exactly `admin` with 403 FORBIDDEN.
#[derive(Debug)]
pub struct AdminUser(pub Identity);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;

        require_role(Some(&identity), Role::Admin.as_str())?;

        Ok(AdminUser(identity))
    }
}
