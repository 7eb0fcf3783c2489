//! Configuration for the token verifier

use std::str::FromStr;

use dm_shared::JwtConfig;
use jsonwebtoken::Algorithm;
use tracing::warn;

/// Configuration for the token verifier
#[derive(Debug, Clone)]
pub struct TokenVerifierConfig {
    /// Shared signing secret; `None` skips the signature check
    pub secret: Option<String>,
    /// Expected JWT signing algorithm
    pub algorithm: Algorithm,
    /// Seconds a token stays usable past its `exp`
    pub leeway_seconds: i64,
}

impl Default for TokenVerifierConfig {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: Algorithm::HS256,
            leeway_seconds: 0,
        }
    }
}

impl TokenVerifierConfig {
    /// Verify signatures with `secret`
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Default::default()
        }
    }
}

impl From<&JwtConfig> for TokenVerifierConfig {
    fn from(config: &JwtConfig) -> Self {
        let algorithm = Algorithm::from_str(&config.algorithm).unwrap_or_else(|_| {
            warn!(algorithm = %config.algorithm, "Unknown JWT algorithm, falling back to HS256");
            Algorithm::HS256
        });
        Self {
            secret: config.secret.clone().filter(|s| !s.is_empty()),
            algorithm,
            leeway_seconds: i64::try_from(config.leeway_seconds).unwrap_or(i64::MAX),
        }
    }
}
