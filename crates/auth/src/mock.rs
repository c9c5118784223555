//! In-memory user store
//!
//! Backs unit tests and local experiments without a database. Counts
//! lookups so callers can assert that nothing is cached between requests,
//! and can be switched into a failing mode to exercise store outages.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;
use wayfare_common::RepositoryError;

use crate::store::UserStore;
use crate::types::UserProfile;

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserProfile>>,
    lookups: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: UserProfile) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id, user);
    }

    pub fn remove(&self, id: Uuid) -> Option<UserProfile> {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    /// Change the stored role of `id`. Returns false if the user is unknown.
    pub fn set_role(&self, id: Uuid, role: &str) -> bool {
        match self
            .users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&id)
        {
            Some(user) => {
                user.role = role.to_string();
                true
            }
            None => false,
        }
    }

    /// Number of `find_by_id` calls served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Make subsequent lookups fail as if the database were down.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::InvalidData(
                "simulated user store outage".to_string(),
            ));
        }

        Ok(self
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned())
    }
}
