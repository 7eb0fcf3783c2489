//! Payment intents through the backend

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use dm_core::errors::DomainError;
use dm_core::services::checkout::{PaymentGateway, PaymentIntent};

use super::client::BackendClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntentResponse {
    #[serde(default)]
    id: Option<String>,
    client_secret: String,
}

#[async_trait]
impl PaymentGateway for BackendClient {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        booking_id: &str,
    ) -> Result<PaymentIntent, DomainError> {
        let builder = self
            .authorized(Method::POST, "create-payment-intent")
            .await
            .json(&json!({
                "amount": amount_minor,
                "currency": currency,
                "bookingId": booking_id,
            }));
        let response: IntentResponse = self.send_json(builder).await?;

        // The intent id is the part of the client secret before "_secret_"
        let id = response.id.unwrap_or_else(|| {
            response
                .client_secret
                .split("_secret_")
                .next()
                .unwrap_or_default()
                .to_string()
        });
        Ok(PaymentIntent {
            id,
            client_secret: response.client_secret,
            amount_minor,
            currency: currency.to_string(),
        })
    }
}
