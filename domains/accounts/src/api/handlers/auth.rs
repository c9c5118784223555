//! Credential issuance handlers
//!
//! Implements:
//! - POST /api/auth/signup - Create an account and return a bearer token
//! - POST /api/auth/login  - Exchange email + password for a bearer token

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wayfare_auth::{AuthGate, Role, UserProfile};
use wayfare_common::{Error, RepositoryError, Result, ValidatedJson};

use super::users::UserResponse;
use crate::api::middleware::AccountsState;
use crate::domain::entities::{normalize_email, NewUser};
use crate::domain::passwords;

pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Request for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// `{"success": true, "token": "...", "user": {...}}`
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

fn issue_for(auth: &AuthGate, user: UserProfile) -> Result<AuthResponse> {
    let token = auth
        .issue(user.id)
        .map_err(|e| Error::Internal(format!("Failed to issue token: {}", e)))?;

    Ok(AuthResponse {
        success: true,
        token,
        user: user.into(),
    })
}

/// Create an account
///
/// **POST /api/auth/signup**
///
/// New accounts always start with the `user` role.
pub async fn signup(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let email = normalize_email(&request.email);

    if state.accounts.find_by_email(&email).await?.is_some() {
        return Err(Error::Conflict(USER_EXISTS_MESSAGE.to_string()));
    }

    let password_hash = passwords::hash(request.password, state.settings.bcrypt_cost).await?;

    let record = state
        .accounts
        .create(NewUser {
            name: request.name.trim().to_string(),
            email,
            password_hash,
            role: Role::User,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent signup for the same email
            RepositoryError::AlreadyExists => Error::Conflict(USER_EXISTS_MESSAGE.to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = %record.id, "User signed up");

    let response = issue_for(&state.auth, record.profile())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in
///
/// **POST /api/auth/login**
///
/// Unknown email and wrong password produce the same response.
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = normalize_email(&request.email);
    let invalid = || Error::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string());

    let Some(record) = state.accounts.find_by_email(&email).await? else {
        tracing::debug!("Login for unknown email");
        passwords::verify_without_account(request.password, state.settings.bcrypt_cost).await?;
        return Err(invalid());
    };

    if !passwords::verify(request.password, record.password_hash.clone()).await? {
        tracing::debug!(user_id = %record.id, "Login with wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = %record.id, "User logged in");

    Ok(Json(issue_for(&state.auth, record.profile())?))
}
