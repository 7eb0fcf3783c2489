//! Sanitation and validation of booking records from the network

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::booking::{
    Booking, BookingStatus, PaymentStatus, PLACEHOLDER_ID_PREFIX,
};

use super::raw;

pub const DEFAULT_SERVICE_NAME: &str = "Service N/A";
pub const DEFAULT_USER_NAME: &str = "Unknown User";
pub const DEFAULT_USER_EMAIL: &str = "No Email";

/// Turn any JSON value into a display-safe booking
///
/// Total: every input shape yields a booking. Absent fields degrade to
/// documented defaults, and synthesized id and date are flagged. Feeding
/// the result back (via [`Booking::to_raw`]) returns it unchanged.
///
/// # Arguments
///
/// * `raw` - The record as received
/// * `fallback_index` - Position in its list; seeds the placeholder id
pub fn sanitize(raw: &Value, fallback_index: usize) -> Booking {
    sanitize_at(raw, fallback_index, Utc::now())
}

/// [`sanitize`] with an explicit clock for the synthesized date
pub fn sanitize_at(raw: &Value, fallback_index: usize, now: DateTime<Utc>) -> Booking {
    let (id, id_is_placeholder) = match raw::document_id(raw.get("_id"))
        .or_else(|| raw::document_id(raw.get("id")))
    {
        Some(id) => {
            let placeholder =
                raw::truthy(raw.get("idIsPlaceholder")) || id.starts_with(PLACEHOLDER_ID_PREFIX);
            (id, placeholder)
        }
        None => (format!("{PLACEHOLDER_ID_PREFIX}{fallback_index}"), true),
    };

    let service = raw.get("service");
    let user = raw.get("user");
    let decorator = raw.get("assignedDecorator");

    let (date, date_is_synthetic) = match raw::date(raw.get("date")) {
        Some(date) => (date, raw::truthy(raw.get("dateIsSynthetic"))),
        None => (now, true),
    };

    let payment_status = payment_status_of(raw);

    Booking {
        id,
        user_id: raw::document_id(raw.get("userId")).or_else(|| raw::reference_id(user)),
        user_name: user_name_of(raw).unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
        user_email: raw::text(raw, "userEmail")
            .or_else(|| raw::nested_text(user, &["email"]))
            .unwrap_or_else(|| DEFAULT_USER_EMAIL.to_string()),
        service_id: raw::document_id(raw.get("serviceId")).or_else(|| raw::reference_id(service)),
        service_name: service_name_of(raw).unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        assigned_decorator: raw::reference_id(decorator)
            .or_else(|| raw::nested_text(decorator, &["email"])),
        decorator_name: raw::text(raw, "decoratorName")
            .or_else(|| raw::nested_text(decorator, &["name"])),
        date,
        location: raw::text(raw, "location"),
        cost: raw::number(raw.get("cost"))
            .or_else(|| service.and_then(|s| raw::number(s.get("cost")))),
        status: status_of(raw),
        payment_status,
        is_paid: payment_status == PaymentStatus::Completed,
        created_at: raw::date(raw.get("createdAt")),
        id_is_placeholder,
        date_is_synthetic,
    }
}

fn service_name_of(raw: &Value) -> Option<String> {
    raw::text(raw, "serviceName")
        .or_else(|| raw::nested_text(raw.get("service"), &["name", "serviceName", "service_name"]))
}

fn user_name_of(raw: &Value) -> Option<String> {
    raw::text(raw, "userName").or_else(|| raw::nested_text(raw.get("user"), &["name", "displayName"]))
}

fn status_of(raw: &Value) -> BookingStatus {
    raw::text(raw, "status")
        .and_then(|s| BookingStatus::parse(&s))
        .unwrap_or(BookingStatus::Pending)
}

/// An explicit `paymentStatus` wins; otherwise `isPaid` decides
fn payment_status_of(raw: &Value) -> PaymentStatus {
    raw::text(raw, "paymentStatus")
        .and_then(|s| PaymentStatus::parse(&s))
        .unwrap_or_else(|| {
            if raw::truthy(raw.get("isPaid")) {
                PaymentStatus::Completed
            } else {
                PaymentStatus::Pending
            }
        })
}

/// Data-quality findings for one raw booking record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub problems: Vec<String>,
}

impl ValidationReport {
    fn from_problems(problems: Vec<String>) -> Self {
        Self {
            valid: problems.is_empty(),
            problems,
        }
    }
}

/// List what is missing or contradictory in a raw record, without changing it
///
/// Checks the required fields (service name, user name, date; a date
/// flagged as synthetic counts as missing) and the payment invariant.
/// The result is advisory and never blocks rendering.
pub fn validate(raw: &Value) -> ValidationReport {
    let mut problems = Vec::new();

    if service_name_of(raw).is_none() {
        problems.push("missing service name".to_string());
    }
    if user_name_of(raw).is_none() {
        problems.push("missing user name".to_string());
    }
    if raw::date(raw.get("date")).is_none() || raw::truthy(raw.get("dateIsSynthetic")) {
        problems.push("missing date".to_string());
    }

    let payment_status = payment_status_of(raw);
    let status = status_of(raw);
    if payment_status == PaymentStatus::Pending
        && !matches!(status, BookingStatus::Pending | BookingStatus::Canceled)
    {
        problems.push(format!("status {status} requires a completed payment"));
    }
    if raw.get("isPaid").is_some()
        && raw::truthy(raw.get("isPaid")) != (payment_status == PaymentStatus::Completed)
    {
        problems.push(format!("isPaid disagrees with payment status {payment_status}"));
    }

    ValidationReport::from_problems(problems)
}
