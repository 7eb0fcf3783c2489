//! Payment record repository module.

mod r#trait;
pub use r#trait::PaymentRepository;

mod mock;
pub use mock::MockPaymentRepository;
