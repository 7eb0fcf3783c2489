//! Authentication session module
//!
//! Owns the current-user state: reads and writes the stored credential,
//! runs the login, logout and refetch lifecycle and notifies subscribers
//! of every change.

mod manager;
mod state;
mod traits;

#[cfg(test)]
mod tests;

pub use manager::SessionManager;
pub use state::{LoginOutcome, Session, SessionState};
pub use traits::ProfileFetcher;
