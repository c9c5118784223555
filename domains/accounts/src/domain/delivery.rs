//! Reset-code delivery seam
//!
//! Sending mail is outside this service. Production wiring uses
//! [`LogOnlyDelivery`]; tests capture codes with [`CapturingDelivery`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Hands a freshly issued reset code to whatever notifies the user.
#[async_trait::async_trait]
pub trait ResetCodeDelivery: Send + Sync {
    async fn deliver(&self, email: &str, code: &str);
}

/// Records that a code was issued without sending it anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyDelivery;

#[async_trait::async_trait]
impl ResetCodeDelivery for LogOnlyDelivery {
    async fn deliver(&self, _email: &str, _code: &str) {
        tracing::warn!("Reset code issued but no delivery channel is configured");
    }
}

/// Keeps the latest code per email in memory.
#[derive(Debug, Default)]
pub struct CapturingDelivery {
    codes: Mutex<HashMap<String, String>>,
}

impl CapturingDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
    }

    pub fn delivered(&self) -> usize {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait::async_trait]
impl ResetCodeDelivery for CapturingDelivery {
    async fn deliver(&self, email: &str, code: &str) {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(email.to_string(), code.to_string());
    }
}
