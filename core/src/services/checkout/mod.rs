//! Checkout: turning a payable booking into a payment intent.

mod service;
mod traits;

pub use service::CheckoutService;
pub use traits::{PaymentGateway, PaymentIntent};
