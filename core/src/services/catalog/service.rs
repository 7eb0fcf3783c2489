//! Catalog browsing for everyone, editing for admins.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::entities::decoration::{DecorationService, ServiceDraft};
use crate::domain::entities::Role;
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AuditLogRepository, ServiceRepository};
use crate::services::audit::AuditService;
use crate::services::policy::require_role;

/// Service for the decoration catalog
pub struct CatalogService<S, A>
where
    S: ServiceRepository,
    A: AuditLogRepository,
{
    services: Arc<S>,
    audit: Arc<AuditService<A>>,
}

impl<S, A> CatalogService<S, A>
where
    S: ServiceRepository,
    A: AuditLogRepository + 'static,
{
    pub fn new(services: Arc<S>, audit: Arc<AuditService<A>>) -> Self {
        Self { services, audit }
    }

    /// Services open for booking
    pub async fn list_active(&self) -> DomainResult<Vec<DecorationService>> {
        Ok(self
            .services
            .find_all()
            .await?
            .into_iter()
            .filter(|s| s.is_active)
            .collect())
    }

    /// Active services promoted on the landing page
    pub async fn list_featured(&self) -> DomainResult<Vec<DecorationService>> {
        Ok(self
            .list_active()
            .await?
            .into_iter()
            .filter(|s| s.is_featured)
            .collect())
    }

    pub async fn get(&self, id: &str) -> DomainResult<DecorationService> {
        self.services
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("service {id}")))
    }

    /// Add a catalog entry (admin only)
    pub async fn create(&self, actor: &Identity, draft: ServiceDraft) -> DomainResult<DecorationService> {
        require_role(Some(actor), &[Role::Admin])?;
        draft.validate()?;

        let id = Uuid::new_v4().simple().to_string();
        let service = self
            .services
            .create(DecorationService::from_draft(id, draft))
            .await?;

        info!(service_id = %service.id, name = %service.name, "Service created");
        self.audit
            .record(
                AuditLog::new(AuditEventType::ServiceCreated, actor, service.id.clone())
                    .with_details(json!({ "name": service.name, "cost": service.cost })),
            )
            .await;
        Ok(service)
    }

    /// Replace the editable fields of a catalog entry (admin only)
    pub async fn update(
        &self,
        actor: &Identity,
        id: &str,
        draft: ServiceDraft,
    ) -> DomainResult<DecorationService> {
        require_role(Some(actor), &[Role::Admin])?;
        draft.validate()?;

        let mut service = self.get(id).await?;
        let previous_cost = service.cost;
        service.apply(draft);
        let service = self.services.update(service).await?;

        self.audit
            .record(
                AuditLog::new(AuditEventType::ServiceUpdated, actor, id)
                    .with_details(json!({ "previousCost": previous_cost, "cost": service.cost })),
            )
            .await;
        Ok(service)
    }

    /// Remove a catalog entry (admin only)
    pub async fn delete(&self, actor: &Identity, id: &str) -> DomainResult<()> {
        require_role(Some(actor), &[Role::Admin])?;
        if !self.services.delete(id).await? {
            return Err(DomainError::not_found(format!("service {id}")));
        }

        info!(service_id = %id, "Service deleted");
        self.audit
            .record(AuditLog::new(AuditEventType::ServiceDeleted, actor, id))
            .await;
        Ok(())
    }
}
