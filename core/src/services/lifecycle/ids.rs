//! Booking identifier checks

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::domain::entities::booking::PLACEHOLDER_ID_PREFIX;
use crate::errors::{DomainError, DomainResult};

/// 24 hex digits, the backend's document id format
static DOCUMENT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{24}$").expect("document id pattern is valid")
});

/// Reject ids that cannot name a stored booking
///
/// Placeholder ids synthesized during sanitation are display-only and are
/// rejected like any other malformed id.
pub fn validate_booking_id(id: &str) -> DomainResult<()> {
    if id.starts_with(PLACEHOLDER_ID_PREFIX) {
        return Err(DomainError::validation(format!(
            "invalid booking id: {id} is a display-only placeholder"
        )));
    }
    if !DOCUMENT_ID_REGEX.is_match(id) {
        return Err(DomainError::validation(format!(
            "invalid booking id: {id} is not a 24-digit hex document id"
        )));
    }
    Ok(())
}

/// Whether an error message reports a malformed booking id
pub fn is_booking_id_error(message: &str) -> bool {
    message.to_lowercase().contains("invalid booking id")
}

/// Fresh id in the document id format
pub fn new_booking_id() -> String {
    Uuid::new_v4().simple().to_string()[..24].to_string()
}
