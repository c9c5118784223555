//! User profile API handlers
//!
//! Implements:
//! - GET /api/auth/me - Return the authenticated user's profile

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use wayfare_auth::{AuthUser, UserProfile};
use wayfare_common::Result;

/// Public view of a user. Built only from [`UserProfile`], which has no
/// password hash to leak.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// `{"success": true, "user": {...}}`
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: UserResponse,
}

impl UserEnvelope {
    pub fn new(user: UserProfile) -> Self {
        Self {
            success: true,
            user: user.into(),
        }
    }
}

/// GET /api/auth/me - Return the authenticated user's profile
pub async fn me(AuthUser(identity): AuthUser) -> Result<Json<UserEnvelope>> {
    Ok(Json(UserEnvelope::new(identity.user)))
}
