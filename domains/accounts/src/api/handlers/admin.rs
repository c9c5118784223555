//! Admin console handlers
//!
//! Implements:
//! - PATCH /api/admin/users/{id}/role - Change a user's role

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use wayfare_auth::{AdminUser, Role};
use wayfare_common::{ApiPath, Error, Result, ValidatedJson};

use super::users::UserEnvelope;
use crate::api::middleware::AccountsState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 32))]
    pub role: String,
}

/// Change a user's role
///
/// **PATCH /api/admin/users/{id}/role**
///
/// Takes effect on the target's next request; credentials already issued
/// to them are not reissued.
pub async fn update_user_role(
    AdminUser(admin): AdminUser,
    State(state): State<AccountsState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<UserEnvelope>> {
    let role: Role = request
        .role
        .parse()
        .map_err(|e| Error::Validation(format!("{}", e)))?;

    let user = state
        .accounts
        .update_role(user_id, role)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    tracing::info!(
        admin_id = %admin.user_id(),
        user_id = %user.id,
        role = %role,
        "User role changed"
    );

    Ok(Json(UserEnvelope::new(user)))
}
