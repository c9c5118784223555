//! Accounts domain: signup, login, password reset, role management

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::delivery::{CapturingDelivery, LogOnlyDelivery, ResetCodeDelivery};
pub use domain::entities::{normalize_email, NewUser, UserRecord};

// Re-export repository types
pub use repository::{AccountRepository, InMemoryAccountRepository, PgAccountRepository};

// Re-export API types
pub use api::routes;
pub use api::{AccountSettings, AccountsState};
