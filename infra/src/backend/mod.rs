//! REST backend and asset host clients
//!
//! Every response that carries bookings passes through the core's
//! sanitation before it reaches a caller.

mod bookings;
mod client;
mod payments;
mod profile;
mod status;
mod upload;

pub use client::BackendClient;
pub use profile::FederatedIdentity;
pub use status::{error_from_response, extract_message};
pub use upload::{extract_image_url, ImageUploader};

#[cfg(test)]
mod tests;
