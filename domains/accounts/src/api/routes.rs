//! Route definitions for Accounts domain API

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{admin, auth, password, users};
use super::middleware::AccountsState;

/// Credential issuance and introspection routes
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(users::me))
}

/// Password reset routes
fn password_routes() -> Router<AccountsState> {
    Router::new()
        .route("/api/auth/forgot-password", post(password::forgot_password))
        .route("/api/auth/reset-password", post(password::reset_password))
}

/// Admin console routes
fn admin_routes() -> Router<AccountsState> {
    Router::new().route("/api/admin/users/{id}/role", patch(admin::update_user_role))
}

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .merge(auth_routes())
        .merge(password_routes())
        .merge(admin_routes())
}
