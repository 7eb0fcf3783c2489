//! Mock implementation of BookingRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::booking::Booking;
use crate::errors::DomainError;

use super::BookingRepository;

/// In-memory booking store
#[derive(Clone, Default)]
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<String, Booking>>>,
    should_fail: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store
    pub async fn insert(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id.clone(), booking);
    }

    /// Make every call fail with an upstream error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Make only create/update fail, leaving reads working
    pub fn set_fail_writes(&self, fail_writes: bool) {
        self.fail_writes.store(fail_writes, Ordering::SeqCst);
    }

    /// Number of successful create/update calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn get(&self, id: &str) -> Option<Booking> {
        self.bookings.read().await.get(id).cloned()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Upstream {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }

    fn check_write_failure(&self) -> Result<(), DomainError> {
        self.check_failure()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Upstream {
                message: "Mock repository write error".to_string(),
            });
        }
        Ok(())
    }

    async fn collect<F>(&self, predicate: F) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings.values().filter(|b| predicate(b)).cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        result
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DomainError> {
        self.check_failure()?;
        Ok(self.bookings.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Booking>, DomainError> {
        self.check_failure()?;
        Ok(self.collect(|_| true).await)
    }

    async fn find_by_owner(&self, user_id: &str, email: &str) -> Result<Vec<Booking>, DomainError> {
        self.check_failure()?;
        Ok(self
            .collect(|b| {
                b.user_id.as_deref() == Some(user_id) || b.user_email.eq_ignore_ascii_case(email)
            })
            .await)
    }

    async fn find_by_decorator(
        &self,
        decorator_id: &str,
        email: &str,
    ) -> Result<Vec<Booking>, DomainError> {
        self.check_failure()?;
        Ok(self
            .collect(|b| match &b.assigned_decorator {
                Some(d) => d == decorator_id || d.eq_ignore_ascii_case(email),
                None => false,
            })
            .await)
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        self.check_write_failure()?;
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.id) {
            return Err(DomainError::Conflict {
                message: format!("booking {} already exists", booking.id),
            });
        }
        bookings.insert(booking.id.clone(), booking.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        self.check_write_failure()?;
        let mut bookings = self.bookings.write().await;
        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::NotFound {
                resource: format!("booking {}", booking.id),
            });
        }
        bookings.insert(booking.id.clone(), booking.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(booking)
    }
}
