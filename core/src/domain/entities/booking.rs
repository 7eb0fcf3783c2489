//! Booking entity: one decoration job booked by a user.
//!
//! A booking moves along two axes. `status` tracks the work; `payment_status`
//! tracks the money. Work may only start once payment has completed, so a
//! booking whose payment is still pending is always `Pending` or `Canceled`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Identity;

/// Prefix of display-only ids synthesized for records that arrived without one
pub const PLACEHOLDER_ID_PREFIX: &str = "placeholder-booking-";

/// Work status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Assigned,
    #[serde(rename = "Planning Phase")]
    PlanningPhase,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(alias = "Cancelled")]
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Assigned => "Assigned",
            BookingStatus::PlanningPhase => "Planning Phase",
            BookingStatus::InProgress => "In Progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Canceled => "Canceled",
        }
    }

    /// Lenient parse: ignores case, spaces, `-` and `_`; accepts "cancelled"
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "pending" => Some(BookingStatus::Pending),
            "assigned" => Some(BookingStatus::Assigned),
            "planningphase" | "planning" => Some(BookingStatus::PlanningPhase),
            "inprogress" => Some(BookingStatus::InProgress),
            "completed" | "complete" => Some(BookingStatus::Completed),
            "canceled" | "cancelled" => Some(BookingStatus::Canceled),
            _ => None,
        }
    }

    /// A decorator is on the job
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            BookingStatus::Assigned | BookingStatus::PlanningPhase | BookingStatus::InProgress
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Money axis of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    /// Captured funds returned through the administrative cancel flow
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "unpaid" => Some(PaymentStatus::Pending),
            "completed" | "complete" | "paid" | "succeeded" => Some(PaymentStatus::Completed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display-safe booking record
///
/// Serializes with the backend's field names, so a sanitized booking fed
/// back through sanitation comes out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,

    pub user_id: Option<String>,
    pub user_name: String,
    pub user_email: String,

    pub service_id: Option<String>,
    pub service_name: String,

    /// Id (or email) of the decorator on the job; `None` while unassigned
    pub assigned_decorator: Option<String>,
    pub decorator_name: Option<String>,

    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub cost: Option<f64>,

    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    /// Mirror of `payment_status == Completed`
    pub is_paid: bool,

    pub created_at: Option<DateTime<Utc>>,

    /// The id was synthesized and must never reach the backend
    #[serde(default)]
    pub id_is_placeholder: bool,

    /// The date was synthesized and is not authoritative
    #[serde(default)]
    pub date_is_synthetic: bool,
}

impl Booking {
    /// A fresh, unpaid booking for `owner`
    pub fn new(id: impl Into<String>, owner: &Identity, request: &BookingRequest) -> Self {
        Self {
            id: id.into(),
            user_id: Some(owner.id.clone()),
            user_name: owner.display_name().to_string(),
            user_email: owner.email.clone(),
            service_id: Some(request.service_id.clone()),
            service_name: request.service_name.clone(),
            assigned_decorator: None,
            decorator_name: None,
            date: request.date,
            location: request.location.clone(),
            cost: Some(request.cost),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            is_paid: false,
            created_at: Some(Utc::now()),
            id_is_placeholder: false,
            date_is_synthetic: false,
        }
    }

    /// Set the payment axis, keeping `is_paid` in step
    pub fn set_payment_status(&mut self, payment_status: PaymentStatus) {
        self.payment_status = payment_status;
        self.is_paid = payment_status == PaymentStatus::Completed;
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Completed
    }

    /// Work can only run on paid bookings; refunds only follow cancellation
    pub fn respects_payment_invariant(&self) -> bool {
        match self.payment_status {
            PaymentStatus::Pending => {
                matches!(self.status, BookingStatus::Pending | BookingStatus::Canceled)
            }
            PaymentStatus::Refunded => self.status == BookingStatus::Canceled,
            PaymentStatus::Completed => true,
        }
    }

    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        match &self.user_id {
            Some(user_id) if user_id == &identity.id => true,
            _ => self.user_email.eq_ignore_ascii_case(&identity.email),
        }
    }

    pub fn is_assigned_to(&self, identity: &Identity) -> bool {
        match &self.assigned_decorator {
            Some(decorator) => {
                decorator == &identity.id || decorator.eq_ignore_ascii_case(&identity.email)
            }
            None => false,
        }
    }

    /// Raw JSON form, as the backend would send it
    pub fn to_raw(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// What a user submits when booking a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service_id: String,
    pub service_name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    pub cost: f64,
}
