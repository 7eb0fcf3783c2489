pub mod audit;
pub mod booking;
pub mod catalog;
pub mod credential;
pub mod payment;
pub mod user;

pub use audit::{AuditLogRepository, MockAuditLogRepository, NoOpAuditLogRepository};
pub use booking::{BookingRepository, MockBookingRepository};
pub use catalog::{MockServiceRepository, ServiceRepository};
pub use credential::{CredentialStore, MockCredentialStore};
pub use payment::{MockPaymentRepository, PaymentRepository};
pub use user::{MockUserRepository, UserRepository};
