//! Resolved identity and the role policy

use uuid::Uuid;

use crate::error::AuthError;
use crate::types::{Role, UserProfile};

/// Identity attached to a request after successful authentication.
///
/// Built fresh for every request from the live user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: UserProfile,
}

impl Identity {
    pub fn new(user: UserProfile) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn role(&self) -> &str {
        &self.user.role
    }

    /// Exact, case-sensitive role comparison
    pub fn has_role(&self, role: &str) -> bool {
        self.user.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin.as_str())
    }
}

/// Outcome of evaluating the role policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(AuthError),
}

impl AccessDecision {
    pub fn evaluate(identity: Option<&Identity>, required_role: &str) -> Self {
        match identity {
            Some(identity) if identity.has_role(required_role) => AccessDecision::Allow,
            _ => AccessDecision::Deny(AuthError::Forbidden),
        }
    }

    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(err) => Err(err),
        }
    }
}

/// Require `identity` to hold exactly `required_role`.
///
/// Fails with [`AuthError::Forbidden`] when there is no identity or the
/// role differs in any way, including case.
pub fn require_role(identity: Option<&Identity>, required_role: &str) -> Result<(), AuthError> {
    let decision = AccessDecision::evaluate(identity, required_role);
    if let (AccessDecision::Deny(_), Some(identity)) = (&decision, identity) {
        tracing::debug!(
            user_id = %identity.user_id(),
            role = %identity.role(),
            required_role,
            "Role check failed"
        );
    }
    decision.into_result()
}
