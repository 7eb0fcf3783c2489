//! Who may move a booking where

use crate::domain::entities::booking::{Booking, BookingStatus, PaymentStatus};
use crate::domain::entities::Role;
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};

/// Transition rules for the booking status axis
///
/// Role violations are `Forbidden`; rule violations are `Conflict`.
pub struct BookingPolicy;

impl BookingPolicy {
    /// Check whether `actor` may move `booking` to `target`
    ///
    /// * `Canceled`: the owning user or an admin, only while payment is
    ///   pending. Paid bookings go through the administrative refund flow.
    /// * `Assigned`: admins only, only once payment has completed; allowed
    ///   from any status but `Completed` (re-assignment included).
    /// * `Planning Phase`, `In Progress`, `Completed`: an admin or the
    ///   assigned decorator, from `Assigned`, `Planning Phase` or
    ///   `In Progress`.
    /// * Nothing returns to `Pending`, and `Completed` is final.
    pub fn check_transition(
        booking: &Booking,
        target: BookingStatus,
        actor: &Identity,
    ) -> DomainResult<()> {
        match target {
            BookingStatus::Canceled => Self::check_cancel(booking, actor),
            BookingStatus::Assigned => Self::check_assign(booking, actor),
            BookingStatus::PlanningPhase | BookingStatus::InProgress | BookingStatus::Completed => {
                Self::check_progress(booking, target, actor)
            }
            BookingStatus::Pending => Err(DomainError::conflict(format!(
                "booking {} cannot return to Pending",
                booking.id
            ))),
        }
    }

    fn check_cancel(booking: &Booking, actor: &Identity) -> DomainResult<()> {
        let owner = actor.role == Role::User && booking.is_owned_by(actor);
        if !(actor.is_admin() || owner) {
            return Err(DomainError::forbidden(
                "only the booking owner or an admin can cancel a booking",
            ));
        }
        match booking.payment_status {
            PaymentStatus::Pending => Ok(()),
            PaymentStatus::Completed => Err(DomainError::conflict(format!(
                "booking {} is paid; cancelling it requires the refund flow",
                booking.id
            ))),
            PaymentStatus::Refunded => Err(DomainError::conflict(format!(
                "booking {} was already canceled and refunded",
                booking.id
            ))),
        }
    }

    fn check_assign(booking: &Booking, actor: &Identity) -> DomainResult<()> {
        if !actor.is_admin() {
            return Err(DomainError::forbidden("only an admin can assign decorators"));
        }
        if !booking.is_paid() {
            return Err(DomainError::conflict(format!(
                "booking {} cannot be assigned before payment completes",
                booking.id
            )));
        }
        if booking.status == BookingStatus::Completed {
            return Err(DomainError::conflict(format!(
                "booking {} is already completed",
                booking.id
            )));
        }
        Ok(())
    }

    fn check_progress(
        booking: &Booking,
        target: BookingStatus,
        actor: &Identity,
    ) -> DomainResult<()> {
        let decorator_on_job = actor.role == Role::Decorator && booking.is_assigned_to(actor);
        if !(actor.is_admin() || decorator_on_job) {
            return Err(DomainError::forbidden(
                "only an admin or the assigned decorator can update progress",
            ));
        }
        if !booking.status.is_active() {
            return Err(DomainError::conflict(format!(
                "booking {} cannot move from {} to {}",
                booking.id, booking.status, target
            )));
        }
        if booking.status == target {
            return Err(DomainError::conflict(format!(
                "booking {} is already {}",
                booking.id, target
            )));
        }
        if !booking.is_paid() {
            return Err(DomainError::conflict(format!(
                "booking {} has no completed payment",
                booking.id
            )));
        }
        Ok(())
    }
}
