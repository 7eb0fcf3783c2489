//! Account administration and self-service profile edits.

mod service;

pub use service::UserAdminService;
