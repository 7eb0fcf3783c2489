//! Audit log entity for recording privileged and money-moving actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::user::Role;
use crate::domain::value_objects::Identity;

/// Event types recorded in the audit trail
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    // Booking events
    BookingCreated,
    BookingTransition,
    DecoratorAssigned,

    // Payment events
    PaymentConfirmed,
    PaymentOverride,
    PaidBookingCanceled,

    // Account events
    RoleChanged,
    ProfileUpdated,

    // Catalog events
    ServiceCreated,
    ServiceUpdated,
    ServiceDeleted,
}

impl AuditEventType {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingCreated => "BOOKING_CREATED",
            Self::BookingTransition => "BOOKING_TRANSITION",
            Self::DecoratorAssigned => "DECORATOR_ASSIGNED",
            Self::PaymentConfirmed => "PAYMENT_CONFIRMED",
            Self::PaymentOverride => "PAYMENT_OVERRIDE",
            Self::PaidBookingCanceled => "PAID_BOOKING_CANCELED",
            Self::RoleChanged => "ROLE_CHANGED",
            Self::ProfileUpdated => "PROFILE_UPDATED",
            Self::ServiceCreated => "SERVICE_CREATED",
            Self::ServiceUpdated => "SERVICE_UPDATED",
            Self::ServiceDeleted => "SERVICE_DELETED",
        }
    }

    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BOOKING_CREATED" => Some(Self::BookingCreated),
            "BOOKING_TRANSITION" => Some(Self::BookingTransition),
            "DECORATOR_ASSIGNED" => Some(Self::DecoratorAssigned),
            "PAYMENT_CONFIRMED" => Some(Self::PaymentConfirmed),
            "PAYMENT_OVERRIDE" => Some(Self::PaymentOverride),
            "PAID_BOOKING_CANCELED" => Some(Self::PaidBookingCanceled),
            "ROLE_CHANGED" => Some(Self::RoleChanged),
            "PROFILE_UPDATED" => Some(Self::ProfileUpdated),
            "SERVICE_CREATED" => Some(Self::ServiceCreated),
            "SERVICE_UPDATED" => Some(Self::ServiceUpdated),
            "SERVICE_DELETED" => Some(Self::ServiceDeleted),
            _ => None,
        }
    }

    /// Events that move money or bypass the payment collaborator
    pub fn is_financial(&self) -> bool {
        matches!(
            self,
            Self::PaymentConfirmed | Self::PaymentOverride | Self::PaidBookingCanceled
        )
    }
}

/// One entry of the audit trail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    pub id: Uuid,
    pub event_type: AuditEventType,

    /// Who performed the action
    pub actor_id: String,
    pub actor_role: Role,

    /// Id of the booking, user or service acted on
    pub target_id: String,

    /// Event-specific data (previous/new values, amounts)
    pub details: Option<JsonValue>,

    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(event_type: AuditEventType, actor: &Identity, target_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            actor_id: actor.id.clone(),
            actor_role: actor.role,
            target_id: target_id.into(),
            details: None,
            created_at: Utc::now(),
        }
    }

    /// Attach event data
    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_round_trip_names() {
        for event in [
            AuditEventType::PaymentOverride,
            AuditEventType::DecoratorAssigned,
            AuditEventType::RoleChanged,
        ] {
            assert_eq!(AuditEventType::from_str(event.as_str()), Some(event));
        }
        assert_eq!(AuditEventType::from_str("LOGIN"), None);
    }

    #[test]
    fn test_override_is_distinct_from_confirmation() {
        assert_ne!(
            AuditEventType::PaymentOverride.as_str(),
            AuditEventType::PaymentConfirmed.as_str()
        );
        assert!(AuditEventType::PaymentOverride.is_financial());
        assert!(!AuditEventType::RoleChanged.is_financial());
    }

    #[test]
    fn test_new_log_captures_actor() {
        let admin = Identity::new("a1", "admin@example.com", Role::Admin, None);
        let log = AuditLog::new(AuditEventType::PaymentOverride, &admin, "b1")
            .with_details(serde_json::json!({"from": "pending", "to": "completed"}));

        assert_eq!(log.actor_id, "a1");
        assert_eq!(log.actor_role, Role::Admin);
        assert_eq!(log.target_id, "b1");
        assert_eq!(log.details.unwrap()["to"], "completed");
    }
}
