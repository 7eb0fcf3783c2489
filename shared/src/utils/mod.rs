//! Common utility functions

pub mod query;
pub mod validation;

// Re-export commonly used utilities
pub use query::{filter, lookup, paginate, search, sort, FilterCriterion, ListQuery};
pub use validation::{validators, ValidationError, ValidationErrors};
