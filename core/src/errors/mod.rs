//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use dm_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Authentication required: {reason}")]
    Unauthenticated { reason: String },

    #[error("Access denied: {message}")]
    Forbidden { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Upstream failure: {message}")]
    Upstream { message: String },

    #[error("Unexpected error: {message}")]
    Unknown { message: String },

    // Bridge to credential errors
    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// What a caller must do with a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Drop the credential and send the visitor to the login route
    LogoutAndRedirect,
    /// Keep the session, show the access-denied view
    AccessDenied,
    /// Keep the session, surface a notification, fall back to empty data
    Notify,
}

impl DomainError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        DomainError::Upstream {
            message: message.into(),
        }
    }

    /// Whether the failure invalidates the current credential
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Unauthenticated { .. } | DomainError::Token(_)
        )
    }

    /// Propagation policy for a request failure
    pub fn disposition(&self) -> ErrorDisposition {
        match self {
            DomainError::Unauthenticated { .. } | DomainError::Token(_) => {
                ErrorDisposition::LogoutAndRedirect
            }
            DomainError::Forbidden { .. } => ErrorDisposition::AccessDenied,
            _ => ErrorDisposition::Notify,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Unauthenticated { .. } => error_codes::UNAUTHENTICATED,
            DomainError::Forbidden { .. } => error_codes::FORBIDDEN,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Conflict { .. } => error_codes::CONFLICT,
            DomainError::Upstream { .. } => error_codes::UPSTREAM_ERROR,
            DomainError::Unknown { .. } => error_codes::UNKNOWN_ERROR,
            DomainError::Token(err) => err.code(),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}
