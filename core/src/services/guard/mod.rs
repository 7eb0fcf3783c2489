//! Route guard
//!
//! Decides what a protected view renders for the current session.

mod decision;
mod table;

#[cfg(test)]
mod tests;

pub use decision::{check, GuardDecision};
pub use table::RouteTable;
