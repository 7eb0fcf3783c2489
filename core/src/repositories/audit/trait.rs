//! Audit log repository trait defining the interface for audit log persistence.

use async_trait::async_trait;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::DomainError;

/// Repository trait for AuditLog entity persistence operations
///
/// Writes happen on the request path of privileged actions; implementations
/// should be quick and callers treat failures as non-fatal.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Create a new audit log entry
    ///
    /// # Arguments
    /// * `audit_log` - The audit log entry to persist
    ///
    /// # Returns
    /// * `Ok(())` on successful creation
    /// * `Err(DomainError)` if the operation fails
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError>;

    /// Find audit logs about a booking, user or service
    ///
    /// # Returns
    /// * Up to `limit` entries, newest first
    async fn find_by_target(
        &self,
        target_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError>;

    /// Find audit logs written by one actor, newest first
    async fn find_by_actor(
        &self,
        actor_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError>;

    /// Find audit logs of one event type, newest first
    async fn find_by_event_type(
        &self,
        event_type: AuditEventType,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError>;
}
