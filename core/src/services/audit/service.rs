//! Audit service recording who changed what.
//!
//! Recording is best-effort: a failed write is logged and never fails the
//! action being audited. Financial events are always written before
//! `record` returns; the rest may be written in the background.

use std::sync::Arc;

use tokio::task;
use tracing::{error, warn};

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::entities::Role;
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AuditLogRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Maximum entries returned by a history query
    pub history_limit: usize,
    /// Whether non-financial writes run on a background task
    pub async_writes: bool,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            async_writes: true,
        }
    }
}

/// Service for writing and reading the audit trail
pub struct AuditService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R> AuditService<R>
where
    R: AuditLogRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Record one audit entry
    pub async fn record(&self, audit_log: AuditLog) {
        if self.config.async_writes && !audit_log.event_type.is_financial() {
            let repository = Arc::clone(&self.repository);
            task::spawn(async move {
                if let Err(e) = repository.create(&audit_log).await {
                    warn!(
                        error = %e,
                        event = audit_log.event_type.as_str(),
                        "Failed to write audit log"
                    );
                }
            });
            return;
        }

        if let Err(e) = self.repository.create(&audit_log).await {
            let event = audit_log.event_type.as_str();
            if audit_log.event_type.is_financial() {
                error!(error = %e, event, target = %audit_log.target_id, "Failed to write financial audit log");
            } else {
                warn!(error = %e, event, "Failed to write audit log");
            }
        }
    }

    /// Entries about one booking, user or service, newest first
    ///
    /// Admins only.
    pub async fn history(&self, actor: &Identity, target_id: &str) -> DomainResult<Vec<AuditLog>> {
        require_admin(actor)?;
        self.repository
            .find_by_target(target_id, self.config.history_limit)
            .await
    }

    /// Entries written by one actor, newest first
    ///
    /// Admins only.
    pub async fn actions_of(&self, actor: &Identity, actor_id: &str) -> DomainResult<Vec<AuditLog>> {
        require_admin(actor)?;
        self.repository
            .find_by_actor(actor_id, self.config.history_limit)
            .await
    }

    /// Every payment override, confirmation and refund, newest first
    ///
    /// Admins only.
    pub async fn financial_events(&self, actor: &Identity) -> DomainResult<Vec<AuditLog>> {
        require_admin(actor)?;
        let mut events = Vec::new();
        for event_type in [
            AuditEventType::PaymentConfirmed,
            AuditEventType::PaymentOverride,
            AuditEventType::PaidBookingCanceled,
        ] {
            events.extend(
                self.repository
                    .find_by_event_type(event_type, self.config.history_limit)
                    .await?,
            );
        }
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(self.config.history_limit);
        Ok(events)
    }
}

fn require_admin(actor: &Identity) -> DomainResult<()> {
    if actor.role != Role::Admin {
        return Err(DomainError::forbidden("audit history is restricted to admins"));
    }
    Ok(())
}
