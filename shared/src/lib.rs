//! Shared utilities and common types for the DecorMarket client core
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Error response envelope and error codes
//! - Pagination and sorting types
//! - In-memory list querying (search, filter, sort, paginate)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, BackendConfig, CredentialStorageConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::{PaginatedResponse, Pagination, SortOrder, SortParams};
pub use utils::query::{FilterCriterion, ListQuery};
