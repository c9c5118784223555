//! Authentication errors
//!
//! The client-facing messages are a fixed contract. The body never says
//! why a credential failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::boundary::ResponseSink;

/// Authentication error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No credential supplied
    #[error("No token, authorization denied")]
    Missing,
    /// Credential failed signature or expiry verification
    #[error("Token is not valid")]
    Invalid,
    /// Credential verified but names no user record
    #[error("User not found")]
    UserNotFound,
    /// Authenticated identity lacks the required role
    #[error("Access denied. Admin privileges required.")]
    Forbidden,
    /// The user store could not be queried
    #[error("Server error")]
    StoreUnavailable,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Missing | AuthError::Invalid | AuthError::UserNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON rejection body, `{"success": false, "message": ...}`
    pub fn body(&self) -> Value {
        json!({
            "success": false,
            "message": self.to_string(),
        })
    }

    /// Write this rejection through a framework-neutral response sink.
    pub fn write_to<R: ResponseSink + ?Sized>(&self, sink: &mut R) {
        sink.set_status(self.status_code());
        sink.send_json(&self.body());
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
