//! Payment repository trait.

use async_trait::async_trait;

use crate::domain::entities::payment::Payment;
use crate::errors::DomainError;

/// Repository trait for payment records
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError>;

    /// Payments recorded against a booking, oldest first
    async fn find_by_booking(&self, booking_id: &str) -> Result<Vec<Payment>, DomainError>;

    async fn update(&self, payment: Payment) -> Result<Payment, DomainError>;
}
