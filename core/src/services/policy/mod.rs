//! Role policy
//!
//! Decides whether a role may enter a role-gated area and where each role
//! lands after signing in.

mod roles;

#[cfg(test)]
mod tests;

pub use roles::{can_access, can_access_str, destination_after_login, home_route, require_role};
