//! Booking lifecycle: sanitation of network records, transition rules and
//! the booking service.

mod config;
mod ids;
mod policy;
mod raw;
mod sanitize;
mod service;

pub use config::BookingServiceConfig;
pub use ids::{is_booking_id_error, new_booking_id, validate_booking_id};
pub use policy::BookingPolicy;
pub use sanitize::{
    sanitize, sanitize_at, validate, ValidationReport, DEFAULT_SERVICE_NAME, DEFAULT_USER_EMAIL,
    DEFAULT_USER_NAME,
};
pub use service::{BookingService, IngestReport, IngestWarning};

#[cfg(test)]
mod tests;
