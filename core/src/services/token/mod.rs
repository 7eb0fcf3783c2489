//! Token verification module
//!
//! Decodes the credential issued by the backend and turns it into an
//! [`Identity`](crate::domain::value_objects::Identity). Verification is
//! pure: no network, no storage.

mod config;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::TokenVerifierConfig;
pub use verifier::TokenVerifier;
