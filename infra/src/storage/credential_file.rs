//! File-backed credential store
//!
//! The token and the profile snapshot live in one JSON document, so they
//! are written and cleared together.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use dm_core::domain::entities::User;
use dm_core::errors::DomainError;
use dm_core::repositories::CredentialStore;

use crate::InfrastructureError;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredential {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    profile: Option<User>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Credential store backed by a single JSON file
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file reads as empty; so does a corrupt one, which is logged
    async fn read(&self) -> Result<StoredCredential, InfrastructureError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredCredential::default()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(stored) => Ok(stored),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Discarding unreadable credential file");
                Ok(StoredCredential::default())
            }
        }
    }

    async fn write(&self, mut stored: StoredCredential) -> Result<(), InfrastructureError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        stored.updated_at = Some(Utc::now());
        let json = serde_json::to_vec_pretty(&stored)?;

        let staging = self.path.with_extension("tmp");
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    async fn modify<F>(&self, change: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut StoredCredential) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut stored = self.read().await?;
        change(&mut stored);
        self.write(stored).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load_token(&self) -> Result<Option<String>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.token.filter(|t| !t.is_empty()))
    }

    async fn save_token(&self, token: &str) -> Result<(), DomainError> {
        let token = token.to_string();
        self.modify(move |stored| {
            // A new credential invalidates the previous user's snapshot
            if stored.token.as_deref() != Some(token.as_str()) {
                stored.profile = None;
            }
            stored.token = Some(token);
        })
        .await
    }

    async fn load_profile(&self) -> Result<Option<User>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.profile)
    }

    async fn save_profile(&self, user: &User) -> Result<(), DomainError> {
        let user = user.clone();
        self.modify(move |stored| stored.profile = Some(user)).await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Credential file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfrastructureError::from(e).into()),
        }
    }
}
