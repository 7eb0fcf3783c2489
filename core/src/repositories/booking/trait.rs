//! Booking repository trait.

use async_trait::async_trait;

use crate::domain::entities::booking::Booking;
use crate::errors::DomainError;

/// Repository trait for Booking persistence
///
/// There is no concurrency token: `update` overwrites whatever is stored,
/// so concurrent edits resolve as last write wins.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by its document id
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DomainError>;

    /// All bookings, newest first
    async fn find_all(&self) -> Result<Vec<Booking>, DomainError>;

    /// Bookings placed by one user, matched by id or email
    async fn find_by_owner(&self, user_id: &str, email: &str) -> Result<Vec<Booking>, DomainError>;

    /// Bookings assigned to one decorator, matched by id or email
    async fn find_by_decorator(
        &self,
        decorator_id: &str,
        email: &str,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Persist a new booking
    ///
    /// # Returns
    /// * The booking as stored
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Overwrite an existing booking
    ///
    /// # Returns
    /// * The booking as stored
    /// * `Err(DomainError::NotFound)` if it does not exist
    async fn update(&self, booking: Booking) -> Result<Booking, DomainError>;
}
