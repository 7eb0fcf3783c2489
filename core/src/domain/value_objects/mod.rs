//! Value objects representing immutable domain concepts.

pub mod identity;
pub mod route;

// Re-export commonly used types
pub use identity::Identity;
pub use route::Route;
