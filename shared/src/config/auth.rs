//! Authentication configuration: token verification and credential storage

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Token verification configuration
///
/// The client verifies credentials issued by the backend. Without a shared
/// secret it can only decode and check expiry; with one it also checks the
/// signature.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to check token signatures (optional)
    #[serde(default)]
    pub secret: Option<String>,

    /// Algorithm for JWT signatures (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Clock skew tolerated when comparing expiry, in seconds
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: default_algorithm(),
            leeway_seconds: 0,
        }
    }
}

impl JwtConfig {
    /// Create a configuration that verifies signatures with `secret`
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// Whether signatures are checked
    pub fn verifies_signature(&self) -> bool {
        self.secret.as_deref().map_or(false, |s| !s.is_empty())
    }
}

/// Where the credential and the cached profile snapshot live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialStorageConfig {
    /// File holding the token and profile snapshot
    pub path: PathBuf,
}

impl Default for CredentialStorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".decormarket/credentials.json"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token verification configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Credential storage configuration
    #[serde(default)]
    pub storage: CredentialStorageConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        let leeway_seconds = std::env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let path = std::env::var("CREDENTIAL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| CredentialStorageConfig::default().path);

        Self {
            jwt: JwtConfig {
                secret,
                algorithm: std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm()),
                leeway_seconds,
            },
            storage: CredentialStorageConfig { path },
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
