//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::{Role, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID
    ///
    /// # Returns
    /// * `Ok(Some(User))` if found
    /// * `Ok(None)` if not found
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// All accounts
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Accounts holding one role
    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError>;

    /// Overwrite an existing account
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` if the user does not exist
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
