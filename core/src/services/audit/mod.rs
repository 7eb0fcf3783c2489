//! Audit trail for privileged and money-moving actions.

mod service;

pub use service::{AuditService, AuditServiceConfig};

#[cfg(test)]
mod tests;
