use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::entities::Role;
use crate::domain::value_objects::Identity;
use crate::errors::DomainError;
use crate::repositories::audit::MockAuditLogRepository;
use crate::services::audit::{AuditService, AuditServiceConfig};

fn admin() -> Identity {
    Identity::new("admin-1", "admin@example.com", Role::Admin, None)
}

fn sync_service(repo: &Arc<MockAuditLogRepository>) -> AuditService<MockAuditLogRepository> {
    let config = AuditServiceConfig {
        async_writes: false,
        ..Default::default()
    };
    AuditService::new(Arc::clone(repo), config)
}

#[tokio::test]
async fn test_record_writes_entry() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = sync_service(&repo);

    service
        .record(
            AuditLog::new(AuditEventType::PaymentOverride, &admin(), "b1")
                .with_details(json!({"from": "pending", "to": "completed"})),
        )
        .await;

    let logs = repo.get_all_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].event_type, AuditEventType::PaymentOverride);
    assert_eq!(logs[0].actor_id, "admin-1");
}

#[tokio::test]
async fn test_financial_events_are_written_inline_even_with_async_writes() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = AuditService::new(Arc::clone(&repo), AuditServiceConfig::default());

    service
        .record(AuditLog::new(AuditEventType::PaymentConfirmed, &admin(), "b1"))
        .await;

    assert_eq!(repo.get_all_logs().len(), 1);
}

#[tokio::test]
async fn test_failed_write_does_not_fail_caller() {
    let repo = Arc::new(MockAuditLogRepository::new());
    repo.set_should_fail(true);
    let service = sync_service(&repo);

    service
        .record(AuditLog::new(AuditEventType::RoleChanged, &admin(), "u1"))
        .await;

    assert!(repo.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_history_is_admin_only() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = sync_service(&repo);
    service
        .record(AuditLog::new(AuditEventType::BookingCreated, &admin(), "b1"))
        .await;

    let user = Identity::new("u1", "user@example.com", Role::User, None);
    let err = service.history(&user, "b1").await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    let history = service.history(&admin(), "b1").await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_financial_events_exclude_other_events() {
    let repo = Arc::new(MockAuditLogRepository::new());
    let service = sync_service(&repo);
    for event in [
        AuditEventType::PaymentOverride,
        AuditEventType::RoleChanged,
        AuditEventType::PaidBookingCanceled,
    ] {
        service.record(AuditLog::new(event, &admin(), "t")).await;
    }

    let events = service.financial_events(&admin()).await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.event_type.is_financial()));
}
