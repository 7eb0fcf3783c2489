//! Mock implementation of AuditLogRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::DomainError;

use super::AuditLogRepository;

/// Mock implementation of AuditLogRepository for testing
#[derive(Clone)]
pub struct MockAuditLogRepository {
    logs: Arc<Mutex<Vec<AuditLog>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAuditLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        if let Ok(mut flag) = self.should_fail.lock() {
            *flag = should_fail;
        }
    }

    /// Get all stored logs for testing
    pub fn get_all_logs(&self) -> Vec<AuditLog> {
        self.logs.lock().map(|logs| logs.clone()).unwrap_or_default()
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        let failing = self.should_fail.lock().map(|flag| *flag).unwrap_or(false);
        if failing {
            return Err(DomainError::Upstream {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }

    fn newest_first<F>(&self, limit: usize, predicate: F) -> Vec<AuditLog>
    where
        F: Fn(&AuditLog) -> bool,
    {
        let mut result: Vec<AuditLog> = self
            .get_all_logs()
            .into_iter()
            .filter(|log| predicate(log))
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit);
        result
    }
}

impl Default for MockAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError> {
        self.check_failure()?;
        if let Ok(mut logs) = self.logs.lock() {
            logs.push(audit_log.clone());
        }
        Ok(())
    }

    async fn find_by_target(
        &self,
        target_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        self.check_failure()?;
        Ok(self.newest_first(limit, |log| log.target_id == target_id))
    }

    async fn find_by_actor(
        &self,
        actor_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        self.check_failure()?;
        Ok(self.newest_first(limit, |log| log.actor_id == actor_id))
    }

    async fn find_by_event_type(
        &self,
        event_type: AuditEventType,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        self.check_failure()?;
        Ok(self.newest_first(limit, |log| log.event_type == event_type))
    }
}
