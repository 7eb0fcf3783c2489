//! Collaborators of the session manager

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Remote profile lookup for the bearer of a credential
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch the profile behind `token`
    ///
    /// # Returns
    /// * `Err(DomainError::Unauthenticated)` if the backend rejects the token
    /// * `Err(DomainError::Upstream)` on network or server failure
    async fn fetch_profile(&self, token: &str) -> Result<User, DomainError>;
}
