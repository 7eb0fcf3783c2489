//! Payment record kept against a booking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Lifecycle of a single charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// A charge recorded against a booking
///
/// Once completed the record is frozen; the only way out is a refund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: String,
    pub amount: f64,
    pub currency: String,
    pub transaction_id: Option<String>,
    pub status: PaymentState,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(booking_id: impl Into<String>, amount: f64, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id: booking_id.into(),
            amount,
            currency: currency.into(),
            transaction_id: None,
            status: PaymentState::Pending,
            created_at: Utc::now(),
        }
    }

    /// Record the gateway's transaction against a pending charge
    pub fn complete(&mut self, transaction_id: impl Into<String>) -> DomainResult<()> {
        self.ensure_pending("complete")?;
        self.transaction_id = Some(transaction_id.into());
        self.status = PaymentState::Completed;
        Ok(())
    }

    pub fn fail(&mut self) -> DomainResult<()> {
        self.ensure_pending("fail")?;
        self.status = PaymentState::Failed;
        Ok(())
    }

    pub fn refund(&mut self) -> DomainResult<()> {
        if self.status != PaymentState::Completed {
            return Err(DomainError::conflict(format!(
                "only completed payments can be refunded (payment is {:?})",
                self.status
            )));
        }
        self.status = PaymentState::Refunded;
        Ok(())
    }

    fn ensure_pending(&self, action: &str) -> DomainResult<()> {
        if self.status == PaymentState::Pending {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "cannot {action} a payment that is {:?}",
                self.status
            )))
        }
    }
}
