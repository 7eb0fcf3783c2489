//! No-op implementation of AuditLogRepository for when audit logging is not needed

use async_trait::async_trait;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::DomainError;
use super::AuditLogRepository;

/// No-op implementation of AuditLogRepository
pub struct NoOpAuditLogRepository;

impl NoOpAuditLogRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for NoOpAuditLogRepository {
    async fn create(&self, _audit_log: &AuditLog) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_target(
        &self,
        _target_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        Ok(Vec::new())
    }

    async fn find_by_actor(
        &self,
        _actor_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        Ok(Vec::new())
    }

    async fn find_by_event_type(
        &self,
        _event_type: AuditEventType,
        _limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        Ok(Vec::new())
    }
}
