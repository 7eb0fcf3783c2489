//! Credential persistence module.
//!
//! The stored token and the cached profile snapshot live and die together.

mod r#trait;
pub use r#trait::CredentialStore;

mod mock;
pub use mock::MockCredentialStore;
