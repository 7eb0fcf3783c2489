//! Mock implementation of ServiceRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::decoration::DecorationService;
use crate::errors::DomainError;

use super::ServiceRepository;

/// In-memory catalog
#[derive(Clone, Default)]
pub struct MockServiceRepository {
    services: Arc<RwLock<HashMap<String, DecorationService>>>,
}

impl MockServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, service: DecorationService) {
        self.services.write().await.insert(service.id.clone(), service);
    }
}

#[async_trait]
impl ServiceRepository for MockServiceRepository {
    async fn find_all(&self) -> Result<Vec<DecorationService>, DomainError> {
        let services = self.services.read().await;
        let mut result: Vec<DecorationService> = services.values().cloned().collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<DecorationService>, DomainError> {
        Ok(self.services.read().await.get(id).cloned())
    }

    async fn create(&self, service: DecorationService) -> Result<DecorationService, DomainError> {
        let mut services = self.services.write().await;
        if services.contains_key(&service.id) {
            return Err(DomainError::Conflict {
                message: format!("service {} already exists", service.id),
            });
        }
        services.insert(service.id.clone(), service.clone());
        Ok(service)
    }

    async fn update(&self, service: DecorationService) -> Result<DecorationService, DomainError> {
        let mut services = self.services.write().await;
        if !services.contains_key(&service.id) {
            return Err(DomainError::NotFound {
                resource: format!("service {}", service.id),
            });
        }
        services.insert(service.id.clone(), service.clone());
        Ok(service)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.services.write().await.remove(id).is_some())
    }
}
