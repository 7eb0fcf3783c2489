//! Booking repository over the REST API

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use dm_core::domain::entities::Booking;
use dm_core::errors::DomainError;
use dm_core::repositories::BookingRepository;
use dm_core::services::lifecycle::sanitize;

use super::client::BackendClient;

/// Records out of a list response: a bare array or one wrapped in
/// `data`, `bookings` or `items`
pub(crate) fn records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["data", "bookings", "items"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// One record out of a single-item response, possibly wrapped in `data`
/// or `booking`
pub(crate) fn record(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") || map.contains_key("booking") => map
            .remove("data")
            .or_else(|| map.remove("booking"))
            .unwrap_or(Value::Null),
        other => other,
    }
}

/// The booking behind a single-item response for `id`
///
/// A response without a usable id keeps the requested one, so a
/// placeholder id never reaches a later write.
pub(crate) fn single(body: Value, id: &str) -> Booking {
    let mut booking = sanitize(&record(body), 0);
    if booking.id_is_placeholder {
        booking.id = id.to_string();
        booking.id_is_placeholder = false;
    }
    booking
}

fn sanitize_all(body: Value) -> Vec<Booking> {
    records(body)
        .iter()
        .enumerate()
        .map(|(index, raw)| sanitize(raw, index))
        .collect()
}

#[async_trait]
impl BookingRepository for BackendClient {
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DomainError> {
        let builder = self.authorized(Method::GET, &format!("bookings/{id}")).await;
        match self.send_json::<Value>(builder).await {
            Ok(body) => Ok(Some(single(body, id))),
            Err(DomainError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find_all(&self) -> Result<Vec<Booking>, DomainError> {
        let builder = self.authorized(Method::GET, "bookings").await;
        Ok(sanitize_all(self.send_json(builder).await?))
    }

    async fn find_by_owner(&self, user_id: &str, email: &str) -> Result<Vec<Booking>, DomainError> {
        let builder = self
            .authorized(Method::GET, "bookings/my")
            .await
            .query(&[("userId", user_id), ("email", email)]);
        Ok(sanitize_all(self.send_json(builder).await?))
    }

    async fn find_by_decorator(
        &self,
        decorator_id: &str,
        email: &str,
    ) -> Result<Vec<Booking>, DomainError> {
        let builder = self
            .authorized(Method::GET, "bookings/assigned")
            .await
            .query(&[("decoratorId", decorator_id), ("email", email)]);
        Ok(sanitize_all(self.send_json(builder).await?))
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let builder = self
            .authorized(Method::POST, "bookings")
            .await
            .json(&booking.to_raw());
        let body: Value = self.send_json(builder).await?;
        Ok(stored_or_sent(body, booking))
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let builder = self
            .authorized(Method::PATCH, &format!("bookings/{}", booking.id))
            .await
            .json(&booking.to_raw());
        let body: Value = self.send_json(builder).await?;
        Ok(stored_or_sent(body, booking))
    }
}

/// The stored booking when the backend echoes it, else what was sent
///
/// Write endpoints often answer with an acknowledgement such as
/// `{"modifiedCount": 1}` instead of the document.
pub(crate) fn stored_or_sent(body: Value, sent: Booking) -> Booking {
    let stored = sanitize(&record(body), 0);
    if stored.id_is_placeholder {
        sent
    } else {
        stored
    }
}
