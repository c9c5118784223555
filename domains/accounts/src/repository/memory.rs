//! In-memory account repository
//!
//! Serves both sides of the users table: the accounts write model and the
//! auth gate's [`UserStore`] read model, so the full HTTP surface can run
//! without a database.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;
use wayfare_auth::{Role, UserProfile, UserStore};
use wayfare_common::RepositoryError;

use super::AccountRepository;
use crate::domain::entities::{NewUser, UserRecord};

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: UserRecord) {
        self.write().insert(record.id, record);
    }

    pub fn remove(&self, id: Uuid) -> Option<UserRecord> {
        self.write().remove(&id)
    }

    /// Overwrite the stored role with arbitrary text, bypassing [`Role`].
    pub fn set_raw_role(&self, id: Uuid, role: &str) -> bool {
        match self.write().get_mut(&id) {
            Some(record) => {
                record.role = role.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<UserRecord> {
        self.read().get(&id).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, UserRecord>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, UserRecord>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepositoryError> {
        let mut users = self.write();
        if users.values().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::AlreadyExists);
        }
        let record = new_user.into_record(Uuid::new_v4(), Utc::now());
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.read().values().find(|u| u.email == email).cloned())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        match self.write().get_mut(&id) {
            Some(record) => {
                record.password_hash = password_hash.to_string();
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_role(
        &self,
        id: Uuid,
        role: Role,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.write().get_mut(&id).map(|record| {
            record.role = role.as_str().to_string();
            record.updated_at = Utc::now();
            record.profile()
        }))
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.read().get(&id).map(UserRecord::profile))
    }
}
