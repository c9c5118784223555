//! Accounts domain state and auth gate integration

use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Duration;
use wayfare_auth::AuthGate;
use wayfare_common::ExpiringStore;

use crate::domain::delivery::ResetCodeDelivery;
use crate::repository::AccountRepository;

/// Tunables for the account flows
#[derive(Debug, Clone, Copy)]
pub struct AccountSettings {
    pub bcrypt_cost: u32,
    pub reset_code_ttl: Duration,
}

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub accounts: Arc<dyn AccountRepository>,
    pub auth: AuthGate,
    pub reset_codes: Arc<dyn ExpiringStore>,
    pub delivery: Arc<dyn ResetCodeDelivery>,
    pub settings: AccountSettings,
}

impl FromRef<AccountsState> for AuthGate {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}
