//! Mock implementation of PaymentRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::payment::Payment;
use crate::errors::DomainError;

use super::PaymentRepository;

/// In-memory payment ledger
#[derive(Clone, Default)]
pub struct MockPaymentRepository {
    payments: Arc<RwLock<Vec<Payment>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Payment> {
        self.payments.read().await.clone()
    }

    /// Make create/update fail with an upstream error
    pub fn set_fail_writes(&self, fail_writes: bool) {
        self.fail_writes.store(fail_writes, Ordering::SeqCst);
    }

    fn check_write_failure(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Upstream {
                message: "Mock payment ledger error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment, DomainError> {
        self.check_write_failure()?;
        self.payments.write().await.push(payment.clone());
        Ok(payment)
    }

    async fn find_by_booking(&self, booking_id: &str) -> Result<Vec<Payment>, DomainError> {
        let payments = self.payments.read().await;
        Ok(payments
            .iter()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect())
    }

    async fn update(&self, payment: Payment) -> Result<Payment, DomainError> {
        self.check_write_failure()?;
        let mut payments = self.payments.write().await;
        match payments.iter_mut().find(|p| p.id == payment.id) {
            Some(existing) => {
                *existing = payment.clone();
                Ok(payment)
            }
            None => Err(DomainError::NotFound {
                resource: format!("payment {}", payment.id),
            }),
        }
    }
}
