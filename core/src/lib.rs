//! # DecorMarket Core
//!
//! Domain layer for the DecorMarket client: role policy, credential
//! verification, the authentication session state machine, route guarding
//! and the booking lifecycle. Transport and storage live behind the
//! repository and collaborator traits defined here and implemented in
//! `dm_infra`.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
