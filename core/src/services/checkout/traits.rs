//! Trait for payment gateway integration

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A charge prepared by the gateway, completed by the payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: String,
    /// Handed to the payment form; never logged
    pub client_secret: String,
    /// Amount in the currency's minor unit
    pub amount_minor: i64,
    pub currency: String,
}

/// Trait for payment gateway integration
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Prepare a charge of `amount_minor` for a booking
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        booking_id: &str,
    ) -> Result<PaymentIntent, DomainError>;
}
