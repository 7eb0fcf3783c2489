//! Checkout service

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::booking::{BookingStatus, PaymentStatus};
use crate::domain::entities::Role;
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::BookingRepository;
use crate::services::lifecycle::validate_booking_id;

use super::traits::{PaymentGateway, PaymentIntent};

/// Prepares payments for bookings
///
/// Only prepares the charge. The booking is marked paid later, when the
/// gateway's result is confirmed through the booking service.
pub struct CheckoutService<B>
where
    B: BookingRepository,
{
    bookings: Arc<B>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl<B> CheckoutService<B>
where
    B: BookingRepository,
{
    pub fn new(bookings: Arc<B>, gateway: Arc<dyn PaymentGateway>, currency: impl Into<String>) -> Self {
        Self {
            bookings,
            gateway,
            currency: currency.into(),
        }
    }

    /// Start paying for a booking
    ///
    /// # Returns
    ///
    /// * `Ok(PaymentIntent)` - ready for the payment form
    /// * `Err(DomainError::Forbidden)` - the actor does not own the booking
    /// * `Err(DomainError::Conflict)` - the booking is not awaiting payment
    /// * `Err(DomainError::Validation)` - malformed id, or nothing to charge
    pub async fn begin_checkout(&self, actor: &Identity, booking_id: &str) -> DomainResult<PaymentIntent> {
        validate_booking_id(booking_id)?;
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("booking {booking_id}")))?;

        if !(actor.role == Role::User && booking.is_owned_by(actor)) {
            return Err(DomainError::forbidden("only the booking owner can pay for it"));
        }
        if booking.payment_status != PaymentStatus::Pending || booking.status != BookingStatus::Pending {
            return Err(DomainError::conflict(format!(
                "booking {booking_id} is not awaiting payment"
            )));
        }
        let amount_minor = match booking.cost {
            Some(cost) if cost.is_finite() && cost > 0.0 => (cost * 100.0).round() as i64,
            _ => {
                return Err(DomainError::validation(format!(
                    "booking {booking_id} has no payable cost"
                )))
            }
        };

        let intent = self
            .gateway
            .create_payment_intent(amount_minor, &self.currency, booking_id)
            .await?;
        info!(booking_id = %booking_id, intent_id = %intent.id, amount_minor, "Payment intent created");
        Ok(intent)
    }
}
