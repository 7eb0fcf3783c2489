//! Credential store trait.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Durable storage for the current credential and its profile snapshot
///
/// Only the session manager writes here.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored token, if any
    async fn load_token(&self) -> Result<Option<String>, DomainError>;

    async fn save_token(&self, token: &str) -> Result<(), DomainError>;

    /// The profile cached alongside the token, if any
    async fn load_profile(&self) -> Result<Option<User>, DomainError>;

    async fn save_profile(&self, user: &User) -> Result<(), DomainError>;

    /// Remove the token and the profile snapshot together
    async fn clear(&self) -> Result<(), DomainError>;
}
