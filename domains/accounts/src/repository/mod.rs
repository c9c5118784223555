//! Repository implementations for the Accounts domain

pub mod memory;
pub mod users;

use uuid::Uuid;
use wayfare_auth::{Role, UserProfile};
use wayfare_common::RepositoryError;

use crate::domain::entities::{NewUser, UserRecord};

pub use memory::InMemoryAccountRepository;
pub use users::PgAccountRepository;

/// Write-side access to user accounts
#[async_trait::async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new user. Duplicate emails fail with `AlreadyExists`.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepositoryError>;

    /// Find a user by normalized email, including the password hash.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;

    /// Replace the password hash. Returns false if the user does not exist.
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, RepositoryError>;

    /// Change the stored role, returning the updated profile.
    async fn update_role(
        &self,
        id: Uuid,
        role: Role,
    ) -> Result<Option<UserProfile>, RepositoryError>;
}
