//! Configuration for the booking service

/// Configuration for the booking service
#[derive(Debug, Clone)]
pub struct BookingServiceConfig {
    /// Currency recorded on payments
    pub currency: String,
    /// Largest accepted difference between a confirmed amount and the cost
    pub amount_tolerance: f64,
}

impl Default for BookingServiceConfig {
    fn default() -> Self {
        Self {
            currency: "usd".to_string(),
            amount_tolerance: 0.01,
        }
    }
}
