//! Domain entities representing core business objects.

pub mod audit;
pub mod booking;
pub mod decoration;
pub mod payment;
pub mod user;

// Re-export commonly used types
pub use audit::{AuditEventType, AuditLog};
pub use booking::{Booking, BookingRequest, BookingStatus, PaymentStatus, PLACEHOLDER_ID_PREFIX};
pub use decoration::{DecorationService, ServiceDraft};
pub use payment::{Payment, PaymentState};
pub use user::{ProfileUpdate, Role, User};
