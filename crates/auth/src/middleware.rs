//! Route-layer middleware
//!
//! `require_auth` / `require_admin` gate a whole router and attach the
//! resolved [`Identity`] to the request extensions for downstream
//! handlers. Install with `axum::middleware::from_fn_with_state`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::context::{require_role, Identity};
use crate::gate::AuthGate;
use crate::types::Role;

/// Reject unauthenticated requests; attach the identity otherwise.
pub async fn require_auth(State(gate): State<AuthGate>, request: Request, next: Next) -> Response {
    gate_request(gate, request, next, None).await
}

/// Reject requests whose live role is not `admin`.
pub async fn require_admin(
    State(gate): State<AuthGate>,
    request: Request,
    next: Next,
) -> Response {
    gate_request(gate, request, next, Some(Role::Admin)).await
}

async fn gate_request(
    gate: AuthGate,
    mut request: Request,
    next: Next,
    required_role: Option<Role>,
) -> Response {
    let identity = match gate.authenticate(request.headers()).await {
        Ok(identity) => identity,
        Err(err) => return err.into_response(),
    };

    if let Some(role) = required_role {
        if let Err(err) = require_role(Some(&identity), role.as_str()) {
            return err.into_response();
        }
    }

    request.extensions_mut().insert::<Identity>(identity);
    next.run(request).await
}
