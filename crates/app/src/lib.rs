//! Wayfare application composition root
//!
//! Composes the domain routers and their collaborators into a single
//! application.

use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use sqlx::PgPool;
use wayfare_accounts::{
    AccountRepository, AccountSettings, AccountsState, LogOnlyDelivery, PgAccountRepository,
    ResetCodeDelivery,
};
use wayfare_auth::{AuthConfig, AuthGate, PgUserStore, TokenCodec, UserStore};
use wayfare_common::{Config, ExpiringStore};

/// Collaborators the accounts domain is built from
pub struct Collaborators {
    pub accounts: Arc<dyn AccountRepository>,
    pub users: Arc<dyn UserStore>,
    pub reset_codes: Arc<dyn ExpiringStore>,
    pub delivery: Arc<dyn ResetCodeDelivery>,
}

/// Build the accounts state, rejecting an unusable signing secret.
pub fn build_state(config: &Config, collaborators: Collaborators) -> anyhow::Result<AccountsState> {
    let auth_config = AuthConfig::new(
        config.jwt_secret.clone(),
        Duration::seconds(config.jwt_ttl_seconds),
    );
    let codec = TokenCodec::new(&auth_config)?;

    Ok(AccountsState {
        accounts: collaborators.accounts,
        auth: AuthGate::new(codec, collaborators.users),
        reset_codes: collaborators.reset_codes,
        delivery: collaborators.delivery,
        settings: AccountSettings {
            bcrypt_cost: config.bcrypt_cost,
            reset_code_ttl: Duration::seconds(config.reset_code_ttl_seconds),
        },
    })
}

/// Router with every route the service exposes
pub fn build_router(state: AccountsState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(wayfare_accounts::routes().with_state(state))
}

/// Create the main application router backed by Postgres
pub fn create_app(
    config: &Config,
    pool: PgPool,
    reset_codes: Arc<dyn ExpiringStore>,
) -> anyhow::Result<Router> {
    let state = build_state(
        config,
        Collaborators {
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool)),
            reset_codes,
            delivery: Arc::new(LogOnlyDelivery),
        },
    )?;

    Ok(build_router(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
