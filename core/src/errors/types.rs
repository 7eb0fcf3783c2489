//! Credential error types
//!
//! Kept apart from `DomainError` so the token verifier can return exactly
//! the three outcomes callers branch on.

use thiserror::Error;

/// Reasons a stored credential cannot be used
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("No credential present")]
    Missing,

    #[error("Credential is malformed")]
    Malformed,

    #[error("Credential has expired")]
    Expired,
}

impl TokenError {
    /// Stable error code for envelopes and logs
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Missing => dm_shared::error_codes::TOKEN_MISSING,
            TokenError::Malformed => dm_shared::error_codes::TOKEN_MALFORMED,
            TokenError::Expired => dm_shared::error_codes::TOKEN_EXPIRED,
        }
    }
}
