//! Booking service: creation, visibility, transitions and the payment axis.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::entities::booking::{Booking, BookingRequest, BookingStatus, PaymentStatus};
use crate::domain::entities::payment::{Payment, PaymentState};
use crate::domain::entities::{Role, User};
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AuditLogRepository, BookingRepository, PaymentRepository};
use crate::services::audit::AuditService;

use super::config::BookingServiceConfig;
use super::ids::{new_booking_id, validate_booking_id};
use super::policy::BookingPolicy;
use super::sanitize::{sanitize, validate};

/// Validation findings for one record of an ingested batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestWarning {
    pub index: usize,
    pub booking_id: String,
    pub problems: Vec<String>,
}

/// A sanitized batch plus what was wrong with it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    pub bookings: Vec<Booking>,
    pub warnings: Vec<IngestWarning>,
}

/// Service for booking lifecycle operations
///
/// Writes are last-write-wins against the repository: no version check is
/// made between reading a booking and storing the change.
pub struct BookingService<B, P, A>
where
    B: BookingRepository,
    P: PaymentRepository,
    A: AuditLogRepository,
{
    bookings: Arc<B>,
    payments: Arc<P>,
    audit: Arc<AuditService<A>>,
    config: BookingServiceConfig,
}

impl<B, P, A> BookingService<B, P, A>
where
    B: BookingRepository,
    P: PaymentRepository,
    A: AuditLogRepository + 'static,
{
    /// Creates a new booking service
    ///
    /// # Arguments
    ///
    /// * `bookings` - Booking storage
    /// * `payments` - Payment records
    /// * `audit` - Audit trail for privileged actions
    /// * `config` - Currency and amount tolerance
    pub fn new(
        bookings: Arc<B>,
        payments: Arc<P>,
        audit: Arc<AuditService<A>>,
        config: BookingServiceConfig,
    ) -> Self {
        Self {
            bookings,
            payments,
            audit,
            config,
        }
    }

    /// Book a service
    ///
    /// Only the `user` role books; the new booking is `Pending` and unpaid.
    pub async fn create(&self, actor: &Identity, request: BookingRequest) -> DomainResult<Booking> {
        if actor.role != Role::User {
            return Err(DomainError::forbidden("only customers can book services"));
        }
        if request.service_id.trim().is_empty() || request.service_name.trim().is_empty() {
            return Err(DomainError::validation("a booking needs a service"));
        }
        if !request.cost.is_finite() || request.cost < 0.0 {
            return Err(DomainError::validation("booking cost must be a non-negative amount"));
        }

        let booking = self
            .bookings
            .create(Booking::new(new_booking_id(), actor, &request))
            .await?;

        info!(booking_id = %booking.id, user_id = %actor.id, "Booking created");
        self.audit
            .record(
                AuditLog::new(AuditEventType::BookingCreated, actor, booking.id.clone())
                    .with_details(json!({ "serviceId": booking.service_id, "cost": booking.cost })),
            )
            .await;
        Ok(booking)
    }

    /// Fetch one booking the actor is allowed to see
    ///
    /// Admins see everything, users their own bookings and decorators the
    /// jobs assigned to them.
    pub async fn get(&self, actor: &Identity, id: &str) -> DomainResult<Booking> {
        let booking = self.load(id).await?;
        let visible = match actor.role {
            Role::Admin => true,
            Role::User => booking.is_owned_by(actor),
            Role::Decorator => booking.is_assigned_to(actor),
        };
        if !visible {
            return Err(DomainError::forbidden(format!("booking {id} belongs to someone else")));
        }
        Ok(booking)
    }

    /// The bookings shown on the actor's dashboard
    pub async fn list_for(&self, actor: &Identity) -> DomainResult<Vec<Booking>> {
        match actor.role {
            Role::Admin => self.bookings.find_all().await,
            Role::Decorator => self.bookings.find_by_decorator(&actor.id, &actor.email).await,
            Role::User => self.bookings.find_by_owner(&actor.id, &actor.email).await,
        }
    }

    /// Move a booking along the status axis
    ///
    /// Assignment needs a decorator and goes through [`Self::assign_decorator`].
    pub async fn transition(
        &self,
        actor: &Identity,
        id: &str,
        target: BookingStatus,
    ) -> DomainResult<Booking> {
        let mut booking = self.load(id).await?;
        BookingPolicy::check_transition(&booking, target, actor)?;
        if target == BookingStatus::Assigned && booking.assigned_decorator.is_none() {
            return Err(DomainError::validation(format!(
                "booking {id} has no decorator to assign"
            )));
        }

        let from = booking.status;
        booking.status = target;
        let booking = self.bookings.update(booking).await?;

        info!(booking_id = %id, from = %from, to = %target, actor = %actor.id, "Booking status changed");
        self.audit
            .record(
                AuditLog::new(AuditEventType::BookingTransition, actor, id)
                    .with_details(json!({ "from": from.as_str(), "to": target.as_str() })),
            )
            .await;
        Ok(booking)
    }

    /// Cancel an unpaid booking
    pub async fn cancel(&self, actor: &Identity, id: &str) -> DomainResult<Booking> {
        self.transition(actor, id, BookingStatus::Canceled).await
    }

    /// Put a decorator on a paid booking
    pub async fn assign_decorator(
        &self,
        actor: &Identity,
        id: &str,
        decorator: &User,
    ) -> DomainResult<Booking> {
        if decorator.role != Role::Decorator {
            return Err(DomainError::validation(format!(
                "{} is not a decorator",
                decorator.email
            )));
        }
        let mut booking = self.load(id).await?;
        BookingPolicy::check_transition(&booking, BookingStatus::Assigned, actor)?;

        let previous = booking.assigned_decorator.take();
        booking.assigned_decorator = Some(decorator.id.clone());
        booking.decorator_name = (!decorator.name.is_empty()).then(|| decorator.name.clone());
        booking.status = BookingStatus::Assigned;
        let booking = self.bookings.update(booking).await?;

        info!(booking_id = %id, decorator_id = %decorator.id, "Decorator assigned");
        self.audit
            .record(
                AuditLog::new(AuditEventType::DecoratorAssigned, actor, id)
                    .with_details(json!({ "previous": previous, "decorator": decorator.id })),
            )
            .await;
        Ok(booking)
    }

    /// Record a successful charge reported by the payment collaborator
    ///
    /// # Arguments
    ///
    /// * `actor` - The booking's owner
    /// * `id` - Booking id
    /// * `transaction_id` - The gateway's reference for the charge
    /// * `amount` - Amount charged, in major units
    ///
    /// The booking is marked paid before the payment record is written. If
    /// the record cannot be written the booking is put back to unpaid.
    pub async fn confirm_payment(
        &self,
        actor: &Identity,
        id: &str,
        transaction_id: &str,
        amount: f64,
    ) -> DomainResult<Booking> {
        let mut booking = self.load(id).await?;
        if !(actor.role == Role::User && booking.is_owned_by(actor)) {
            return Err(DomainError::forbidden("only the booking owner can pay for it"));
        }
        if booking.payment_status != PaymentStatus::Pending {
            return Err(DomainError::conflict(format!(
                "booking {id} payment is already {}",
                booking.payment_status
            )));
        }
        if booking.status != BookingStatus::Pending {
            return Err(DomainError::conflict(format!(
                "booking {id} is {} and cannot be paid",
                booking.status
            )));
        }
        if transaction_id.trim().is_empty() {
            return Err(DomainError::validation("transaction id is required"));
        }
        let cost = booking
            .cost
            .ok_or_else(|| DomainError::validation(format!("booking {id} has no cost")))?;
        if !amount.is_finite() || (amount - cost).abs() > self.config.amount_tolerance {
            return Err(DomainError::validation(format!(
                "paid amount {amount} does not match booking cost {cost}"
            )));
        }

        let mut payment = Payment::new(id, amount, self.config.currency.clone());
        payment.complete(transaction_id)?;

        booking.set_payment_status(PaymentStatus::Completed);
        let booking = self.bookings.update(booking).await?;

        let payment = match self.payments.create(payment).await {
            Ok(payment) => payment,
            Err(e) => {
                error!(booking_id = %id, error = %e, "Payment record failed, reverting booking");
                let mut reverted = booking;
                reverted.set_payment_status(PaymentStatus::Pending);
                if let Err(revert) = self.bookings.update(reverted).await {
                    error!(booking_id = %id, error = %revert, "Could not revert booking payment status");
                }
                return Err(e);
            }
        };

        info!(booking_id = %id, payment_id = %payment.id, "Payment confirmed");
        self.audit
            .record(
                AuditLog::new(AuditEventType::PaymentConfirmed, actor, id).with_details(json!({
                    "paymentId": payment.id,
                    "transactionId": transaction_id,
                    "amount": amount,
                    "currency": payment.currency,
                })),
            )
            .await;
        Ok(booking)
    }

    /// Administrative payment override
    ///
    /// Bypasses the payment collaborator, so it is admin-only, audited
    /// separately from confirmations and returns only after the store has
    /// accepted the change. Setting a booking back to unpaid is refused
    /// while a decorator is on it, and refunded bookings are final.
    pub async fn override_payment_status(
        &self,
        actor: &Identity,
        id: &str,
        paid: bool,
    ) -> DomainResult<Booking> {
        if !actor.is_admin() {
            return Err(DomainError::forbidden("only an admin can override payment status"));
        }
        let mut booking = self.load(id).await?;
        let from = booking.payment_status;
        let to = if paid {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Pending
        };

        if from == PaymentStatus::Refunded {
            return Err(DomainError::conflict(format!("booking {id} was refunded")));
        }
        if from == to {
            return Ok(booking);
        }
        if !paid && !matches!(booking.status, BookingStatus::Pending | BookingStatus::Canceled) {
            return Err(DomainError::conflict(format!(
                "booking {id} is {} and must stay paid",
                booking.status
            )));
        }

        booking.set_payment_status(to);
        let booking = self.bookings.update(booking).await?;

        warn!(booking_id = %id, admin = %actor.id, from = %from, to = %to, "Payment status overridden");
        self.audit
            .record(
                AuditLog::new(AuditEventType::PaymentOverride, actor, id)
                    .with_details(json!({ "from": from.as_str(), "to": to.as_str() })),
            )
            .await;
        Ok(booking)
    }

    /// Cancel a paid booking and refund its charges
    ///
    /// The booking is canceled first, then each completed payment is
    /// refunded. When the first refund fails the booking is restored; a
    /// failure after some refunds leaves the booking canceled and is
    /// returned to the caller.
    pub async fn cancel_paid_booking(
        &self,
        actor: &Identity,
        id: &str,
        reason: &str,
    ) -> DomainResult<Booking> {
        if !actor.is_admin() {
            return Err(DomainError::forbidden("only an admin can cancel a paid booking"));
        }
        let mut booking = self.load(id).await?;
        if !booking.is_paid() {
            return Err(DomainError::conflict(format!(
                "booking {id} is not paid; cancel it directly"
            )));
        }
        if booking.status == BookingStatus::Completed {
            return Err(DomainError::conflict(format!("booking {id} is already completed")));
        }

        let payments = self.payments.find_by_booking(id).await?;
        let original = booking.clone();
        let from = booking.status;
        booking.status = BookingStatus::Canceled;
        booking.set_payment_status(PaymentStatus::Refunded);
        let booking = self.bookings.update(booking).await?;

        let mut refunded = Vec::new();
        for mut payment in payments {
            if payment.status != PaymentState::Completed {
                continue;
            }
            let result = match payment.refund() {
                Ok(()) => self.payments.update(payment).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(payment) => refunded.push(payment.id),
                Err(e) if refunded.is_empty() => {
                    error!(booking_id = %id, error = %e, "Refund failed, restoring booking");
                    if let Err(restore) = self.bookings.update(original).await {
                        error!(booking_id = %id, error = %restore, "Could not restore booking");
                    }
                    return Err(e);
                }
                Err(e) => {
                    error!(booking_id = %id, refunded = ?refunded, error = %e, "Refund interrupted");
                    return Err(e);
                }
            }
        }

        warn!(booking_id = %id, admin = %actor.id, refunds = refunded.len(), "Paid booking canceled");
        self.audit
            .record(
                AuditLog::new(AuditEventType::PaidBookingCanceled, actor, id).with_details(json!({
                    "from": from.as_str(),
                    "reason": reason,
                    "refundedPayments": refunded,
                })),
            )
            .await;
        Ok(booking)
    }

    /// Sanitize a batch of raw records, collecting validation findings
    pub fn ingest(&self, records: &[Value]) -> IngestReport {
        let mut report = IngestReport::default();
        for (index, raw) in records.iter().enumerate() {
            let booking = sanitize(raw, index);
            let findings = validate(raw);
            if !findings.valid {
                report.warnings.push(IngestWarning {
                    index,
                    booking_id: booking.id.clone(),
                    problems: findings.problems,
                });
            }
            report.bookings.push(booking);
        }
        if !report.warnings.is_empty() {
            warn!(
                total = records.len(),
                flagged = report.warnings.len(),
                "Booking records failed validation"
            );
        }
        report
    }

    /// Audit trail of one booking; admins only
    pub async fn history(&self, actor: &Identity, id: &str) -> DomainResult<Vec<AuditLog>> {
        validate_booking_id(id)?;
        self.audit.history(actor, id).await
    }

    async fn load(&self, id: &str) -> DomainResult<Booking> {
        validate_booking_id(id)?;
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("booking {id}")))
    }
}
