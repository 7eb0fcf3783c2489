//! # Infrastructure Layer
//!
//! Concrete collaborators for the DecorMarket core:
//!
//! - **Backend**: REST client for profiles, token exchange, bookings and
//!   payment intents, plus the image uploader for the asset host
//! - **Storage**: file-backed credential store
//! - **Telemetry**: `tracing` subscriber setup
//!
//! [`initialize`] wires them into a ready session manager.

use std::sync::Arc;

use anyhow::Context;
use dm_core::errors::DomainError;
use dm_core::services::session::SessionManager;
use dm_core::services::token::{TokenVerifier, TokenVerifierConfig};
use dm_shared::AppConfig;

/// Backend module - REST API and asset host clients
pub mod backend;

/// Storage module - Credential persistence
pub mod storage;

/// Telemetry module - Logging setup
pub mod telemetry;

pub use backend::{BackendClient, ImageUploader};
pub use storage::FileCredentialStore;
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for the backend or asset host
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON payload
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Asset host rejected or garbled an upload
    #[error("Upload error: {0}")]
    Upload(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::upstream(err.to_string())
    }
}

/// Load configuration from the environment
///
/// Reads the per-environment `.env` file first, then `.env`; variables
/// already set in the process win over both.
pub fn load_config() -> AppConfig {
    let environment = dm_shared::Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    pub backend: Arc<BackendClient>,
    pub credentials: Arc<FileCredentialStore>,
    pub uploader: Option<Arc<ImageUploader>>,
    pub session: Arc<SessionManager>,
}

/// Build the collaborators and restore the stored session
pub async fn initialize(config: &AppConfig) -> anyhow::Result<InfrastructureServices> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services");

    let credentials = Arc::new(FileCredentialStore::new(&config.auth.storage.path));
    let backend = Arc::new(
        BackendClient::new(&config.backend)
            .context("Failed to build backend client")?
            .with_credentials(credentials.clone()),
    );
    let uploader = match ImageUploader::from_config(&config.backend) {
        Ok(uploader) => Some(Arc::new(uploader)),
        Err(e) => {
            tracing::warn!(error = %e, "Image uploads disabled");
            None
        }
    };

    let verifier = Arc::new(TokenVerifier::new(TokenVerifierConfig::from(&config.auth.jwt)));
    let session = Arc::new(SessionManager::new(verifier, backend.clone(), credentials.clone()));
    let restored = session.initialize().await;
    tracing::info!(authenticated = restored.is_authenticated(), "Session restored");

    Ok(InfrastructureServices {
        backend,
        credentials,
        uploader,
        session,
    })
}
