//! Type definitions module
//!
//! - `common` - Sorting parameters
//! - `pagination` - Page windows over lists

pub mod common;
pub mod pagination;

// Re-export commonly used types at module level
pub use common::{SortOrder, SortParams};
pub use pagination::{PaginatedResponse, Pagination};
