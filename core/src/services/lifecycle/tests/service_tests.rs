use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::audit::AuditEventType;
use crate::domain::entities::booking::{BookingStatus, PaymentStatus};
use crate::domain::entities::payment::{Payment, PaymentState};
use crate::domain::entities::{Role, User};
use crate::errors::DomainError;
use crate::repositories::{
    MockAuditLogRepository, MockBookingRepository, MockPaymentRepository, PaymentRepository,
};
use crate::services::audit::{AuditService, AuditServiceConfig};
use crate::services::lifecycle::{BookingService, BookingServiceConfig};

use super::fixtures::*;

struct Harness {
    bookings: Arc<MockBookingRepository>,
    payments: Arc<MockPaymentRepository>,
    audit: Arc<MockAuditLogRepository>,
    service: BookingService<MockBookingRepository, MockPaymentRepository, MockAuditLogRepository>,
}

fn harness() -> Harness {
    let bookings = Arc::new(MockBookingRepository::new());
    let payments = Arc::new(MockPaymentRepository::new());
    let audit = Arc::new(MockAuditLogRepository::new());
    let audit_service = Arc::new(AuditService::new(
        Arc::clone(&audit),
        AuditServiceConfig {
            async_writes: false,
            ..Default::default()
        },
    ));
    let service = BookingService::new(
        Arc::clone(&bookings),
        Arc::clone(&payments),
        audit_service,
        BookingServiceConfig::default(),
    );
    Harness {
        bookings,
        payments,
        audit,
        service,
    }
}

fn decorator_user() -> User {
    User::new("dec-1", "dec@example.com", "Dee", Role::Decorator)
}

fn events(h: &Harness) -> Vec<AuditEventType> {
    h.audit.get_all_logs().into_iter().map(|l| l.event_type).collect()
}

#[tokio::test]
async fn test_create_is_for_customers_only() {
    let h = harness();

    let booking = h.service.create(&owner(), request()).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert!(!booking.is_paid());
    assert_eq!(booking.user_id.as_deref(), Some("user-1"));
    assert_eq!(events(&h), vec![AuditEventType::BookingCreated]);

    let err = h.service.create(&admin(), request()).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    let mut bad = request();
    bad.cost = f64::NAN;
    let err = h.service.create(&owner(), bad).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_get_respects_visibility() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Assigned, PaymentStatus::Completed))
        .await;

    assert!(h.service.get(&owner(), BOOKING_ID).await.is_ok());
    assert!(h.service.get(&admin(), BOOKING_ID).await.is_ok());
    assert!(h.service.get(&decorator(), BOOKING_ID).await.is_ok());
    let err = h.service.get(&stranger(), BOOKING_ID).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));
}

#[tokio::test]
async fn test_placeholder_id_never_reaches_store() {
    let h = harness();
    let err = h.service.get(&admin(), "placeholder-booking-0").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = h
        .service
        .get(&admin(), "64b7f3a2c9e1d4f5a6b7c8d0")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_for_scopes_by_role() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Assigned, PaymentStatus::Completed))
        .await;
    let mut other = booking(BookingStatus::Pending, PaymentStatus::Pending);
    other.id = "64b7f3a2c9e1d4f5a6b7c8d0".to_string();
    other.user_id = Some("user-2".to_string());
    other.user_email = "stranger@example.com".to_string();
    h.bookings.insert(other).await;

    assert_eq!(h.service.list_for(&admin()).await.unwrap().len(), 2);
    assert_eq!(h.service.list_for(&owner()).await.unwrap().len(), 1);
    assert_eq!(h.service.list_for(&stranger()).await.unwrap().len(), 1);
    assert_eq!(h.service.list_for(&decorator()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_full_lifecycle() {
    let h = harness();
    let created = h.service.create(&owner(), request()).await.unwrap();
    let id = created.id.clone();

    let err = h
        .service
        .assign_decorator(&admin(), &id, &decorator_user())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    let paid = h
        .service
        .confirm_payment(&owner(), &id, "pi_123", 450.0)
        .await
        .unwrap();
    assert!(paid.is_paid);
    assert_eq!(h.payments.all().await[0].status, PaymentState::Completed);

    let assigned = h
        .service
        .assign_decorator(&admin(), &id, &decorator_user())
        .await
        .unwrap();
    assert_eq!(assigned.status, BookingStatus::Assigned);
    assert_eq!(assigned.decorator_name.as_deref(), Some("Dee"));

    for target in [
        BookingStatus::PlanningPhase,
        BookingStatus::InProgress,
        BookingStatus::Completed,
    ] {
        h.service.transition(&decorator(), &id, target).await.unwrap();
    }

    let done = h.bookings.get(&id).await.unwrap();
    assert_eq!(done.status, BookingStatus::Completed);
    assert!(done.respects_payment_invariant());
    assert_eq!(
        events(&h),
        vec![
            AuditEventType::BookingCreated,
            AuditEventType::PaymentConfirmed,
            AuditEventType::DecoratorAssigned,
            AuditEventType::BookingTransition,
            AuditEventType::BookingTransition,
            AuditEventType::BookingTransition,
        ]
    );
}

#[tokio::test]
async fn test_confirm_payment_checks_amount_and_owner() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Pending))
        .await;

    let err = h
        .service
        .confirm_payment(&stranger(), BOOKING_ID, "pi_1", 450.0)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    let err = h
        .service
        .confirm_payment(&owner(), BOOKING_ID, "pi_1", 45.0)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert!(h.payments.all().await.is_empty());
}

#[tokio::test]
async fn test_transition_to_assigned_needs_decorator() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Completed))
        .await;

    let err = h
        .service
        .transition(&admin(), BOOKING_ID, BookingStatus::Assigned)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_transition_to_assigned_unpaid_is_conflict() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Pending))
        .await;

    let err = h
        .service
        .transition(&admin(), BOOKING_ID, BookingStatus::Assigned)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    let err = h
        .service
        .transition(&owner(), BOOKING_ID, BookingStatus::Assigned)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));
    assert_eq!(h.bookings.write_count(), 0);
}

#[tokio::test]
async fn test_assign_rejects_non_decorator() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Completed))
        .await;
    let not_decorator = User::new("user-2", "stranger@example.com", "S", Role::User);

    let err = h
        .service
        .assign_decorator(&admin(), BOOKING_ID, &not_decorator)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_cancel_unpaid_and_refuse_paid() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Pending))
        .await;
    let canceled = h.service.cancel(&owner(), BOOKING_ID).await.unwrap();
    assert_eq!(canceled.status, BookingStatus::Canceled);

    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Completed))
        .await;
    let err = h.service.cancel(&owner(), BOOKING_ID).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
    assert_eq!(h.bookings.write_count(), 0);
}

#[tokio::test]
async fn test_override_is_persisted_and_audited_separately() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Pending))
        .await;

    let updated = h
        .service
        .override_payment_status(&admin(), BOOKING_ID, true)
        .await
        .unwrap();

    assert!(updated.is_paid);
    assert!(h.bookings.get(BOOKING_ID).await.unwrap().is_paid);
    assert_eq!(events(&h), vec![AuditEventType::PaymentOverride]);
    let log = &h.audit.get_all_logs()[0];
    assert_eq!(log.details, Some(json!({"from": "pending", "to": "completed"})));
}

#[tokio::test]
async fn test_override_failure_is_reported_not_assumed() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Pending))
        .await;
    h.bookings.set_should_fail(true);

    let err = h
        .service
        .override_payment_status(&admin(), BOOKING_ID, true)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Upstream { .. }));
    assert!(h.audit.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_override_guards_invariant_and_role() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::InProgress, PaymentStatus::Completed))
        .await;

    let err = h
        .service
        .override_payment_status(&owner(), BOOKING_ID, false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    let err = h
        .service
        .override_payment_status(&admin(), BOOKING_ID, false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
    assert!(h.bookings.get(BOOKING_ID).await.unwrap().respects_payment_invariant());
}

#[tokio::test]
async fn test_cancel_paid_booking_refunds() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Assigned, PaymentStatus::Completed))
        .await;
    let mut payment = Payment::new(BOOKING_ID, 450.0, "usd");
    payment.complete("pi_9").unwrap();
    h.payments.create(payment).await.unwrap();

    let canceled = h
        .service
        .cancel_paid_booking(&admin(), BOOKING_ID, "venue closed")
        .await
        .unwrap();

    assert_eq!(canceled.status, BookingStatus::Canceled);
    assert_eq!(canceled.payment_status, PaymentStatus::Refunded);
    assert!(canceled.respects_payment_invariant());
    assert_eq!(h.payments.all().await[0].status, PaymentState::Refunded);
    assert_eq!(events(&h), vec![AuditEventType::PaidBookingCanceled]);

    let history = h.service.history(&admin(), BOOKING_ID).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_confirm_payment_booking_write_failure_records_no_payment() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Pending))
        .await;
    h.bookings.set_fail_writes(true);

    let err = h
        .service
        .confirm_payment(&owner(), BOOKING_ID, "pi_1", 450.0)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Upstream { .. }));
    assert!(h.payments.all().await.is_empty());
    assert!(!h.bookings.get(BOOKING_ID).await.unwrap().is_paid());
    assert!(h.audit.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_confirm_payment_ledger_failure_reverts_booking() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Pending, PaymentStatus::Pending))
        .await;
    h.payments.set_fail_writes(true);

    let err = h
        .service
        .confirm_payment(&owner(), BOOKING_ID, "pi_1", 450.0)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Upstream { .. }));
    let stored = h.bookings.get(BOOKING_ID).await.unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
    assert!(!stored.is_paid);
    assert!(h.audit.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_cancel_paid_booking_write_failure_keeps_payments() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Assigned, PaymentStatus::Completed))
        .await;
    let mut payment = Payment::new(BOOKING_ID, 450.0, "usd");
    payment.complete("pi_9").unwrap();
    h.payments.create(payment).await.unwrap();
    h.bookings.set_fail_writes(true);

    let err = h
        .service
        .cancel_paid_booking(&admin(), BOOKING_ID, "venue closed")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Upstream { .. }));
    assert_eq!(h.payments.all().await[0].status, PaymentState::Completed);
    assert_eq!(h.bookings.get(BOOKING_ID).await.unwrap().status, BookingStatus::Assigned);
}

#[tokio::test]
async fn test_cancel_paid_booking_refund_failure_restores_booking() {
    let h = harness();
    h.bookings
        .insert(booking(BookingStatus::Assigned, PaymentStatus::Completed))
        .await;
    let mut payment = Payment::new(BOOKING_ID, 450.0, "usd");
    payment.complete("pi_9").unwrap();
    h.payments.create(payment).await.unwrap();
    h.payments.set_fail_writes(true);

    let err = h
        .service
        .cancel_paid_booking(&admin(), BOOKING_ID, "venue closed")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Upstream { .. }));
    let stored = h.bookings.get(BOOKING_ID).await.unwrap();
    assert_eq!(stored.status, BookingStatus::Assigned);
    assert_eq!(stored.payment_status, PaymentStatus::Completed);
    assert_eq!(h.payments.all().await[0].status, PaymentState::Completed);
    assert!(h.audit.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_ingest_sanitizes_and_collects_warnings() {
    let h = harness();
    let records = vec![
        booking(BookingStatus::Pending, PaymentStatus::Pending).to_raw(),
        json!({"status": "Pending"}),
        serde_json::Value::Null,
    ];

    let report = h.service.ingest(&records);

    assert_eq!(report.bookings.len(), 3);
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.warnings[0].index, 1);
    assert_eq!(report.warnings[0].booking_id, "placeholder-booking-1");
}
