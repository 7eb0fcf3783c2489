//! Catalog repository trait.

use async_trait::async_trait;

use crate::domain::entities::decoration::DecorationService;
use crate::errors::DomainError;

/// Repository trait for decoration service entries
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<DecorationService>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<DecorationService>, DomainError>;

    async fn create(&self, service: DecorationService) -> Result<DecorationService, DomainError>;

    async fn update(&self, service: DecorationService) -> Result<DecorationService, DomainError>;

    /// Remove an entry
    ///
    /// # Returns
    /// * `Ok(true)` if something was deleted
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
