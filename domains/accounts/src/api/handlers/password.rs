//! Password reset API handlers
//!
//! Implements:
//! - POST /api/auth/forgot-password - Issue a short-lived reset code
//! - POST /api/auth/reset-password  - Consume the code and replace the password

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wayfare_common::{hash_secret, verify_secret_hash, Error, Result, ValidatedJson};

use crate::api::middleware::AccountsState;
use crate::domain::entities::normalize_email;
use crate::domain::passwords;
use crate::domain::reset::{attempts_key, code_key, generate_reset_code, MAX_RESET_ATTEMPTS};

pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists for that email, a reset code has been sent";
pub const PASSWORD_RESET_MESSAGE: &str = "Password has been reset";
pub const INVALID_RESET_CODE_MESSAGE: &str = "Invalid or expired reset code";

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 6))]
    pub code: String,

    #[serde(alias = "newPassword")]
    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    fn ok(message: &'static str) -> Json<Self> {
        Json(Self {
            success: true,
            message,
        })
    }
}

fn invalid_code() -> Error {
    Error::Validation(INVALID_RESET_CODE_MESSAGE.to_string())
}

/// Request a reset code
///
/// **POST /api/auth/forgot-password**
///
/// Responds identically whether or not the account exists. A new request
/// replaces any outstanding code and clears its failed-attempt counter.
pub async fn forgot_password(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let email = normalize_email(&request.email);

    let Some(record) = state.accounts.find_by_email(&email).await? else {
        tracing::debug!("Password reset requested for unknown email");
        return Ok(MessageResponse::ok(FORGOT_PASSWORD_MESSAGE));
    };

    let code = generate_reset_code();
    let ttl = state.settings.reset_code_ttl;
    state
        .reset_codes
        .put(&code_key(&email), hash_secret(&code), ttl)
        .await;
    state.reset_codes.remove(&attempts_key(&email)).await;
    state.delivery.deliver(&email, &code).await;

    tracing::info!(user_id = %record.id, "Password reset code issued");

    Ok(MessageResponse::ok(FORGOT_PASSWORD_MESSAGE))
}

/// Reset a password with a previously issued code
///
/// **POST /api/auth/reset-password**
///
/// After [`MAX_RESET_ATTEMPTS`] wrong guesses the outstanding code is
/// discarded and a new one must be requested.
pub async fn reset_password(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let email = normalize_email(&request.email);
    let code_key = code_key(&email);
    let attempts_key = attempts_key(&email);
    let store = &state.reset_codes;

    let Some(stored) = store.get(&code_key).await else {
        return Err(invalid_code());
    };

    if !verify_secret_hash(&request.code, &stored) {
        let attempts = store
            .increment(&attempts_key, state.settings.reset_code_ttl)
            .await;

        if attempts >= MAX_RESET_ATTEMPTS {
            tracing::warn!(attempts, "Too many wrong reset codes, discarding code");
            store.remove(&code_key).await;
        }
        return Err(invalid_code());
    }

    // Wrong guesses racing this one may have used up the budget already.
    let spent = store
        .get(&attempts_key)
        .await
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(0);
    if spent >= MAX_RESET_ATTEMPTS {
        store.remove(&code_key).await;
        return Err(invalid_code());
    }

    // Whoever takes the code first wins; a concurrent reset sees None.
    if store.take(&code_key).await.is_none() {
        return Err(invalid_code());
    }
    store.remove(&attempts_key).await;

    let Some(record) = state.accounts.find_by_email(&email).await? else {
        return Err(invalid_code());
    };

    let password_hash =
        passwords::hash(request.new_password, state.settings.bcrypt_cost).await?;
    if !state
        .accounts
        .update_password(record.id, &password_hash)
        .await?
    {
        return Err(invalid_code());
    }

    tracing::info!(user_id = %record.id, "Password reset");

    Ok(MessageResponse::ok(PASSWORD_RESET_MESSAGE))
}
