//! In-memory credential store for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::CredentialStore;

#[derive(Debug, Default)]
struct Stored {
    token: Option<String>,
    profile: Option<User>,
}

/// Mock credential store
#[derive(Clone, Default)]
pub struct MockCredentialStore {
    stored: Arc<RwLock<Stored>>,
    clears: Arc<AtomicUsize>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already stored
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut stored) = store.stored.try_write() {
            stored.token = Some(token.into());
        }
        store
    }

    pub async fn token(&self) -> Option<String> {
        self.stored.read().await.token.clone()
    }

    pub async fn profile(&self) -> Option<User> {
        self.stored.read().await.profile.clone()
    }

    /// Number of `clear` calls
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn load_token(&self) -> Result<Option<String>, DomainError> {
        Ok(self.token().await)
    }

    async fn save_token(&self, token: &str) -> Result<(), DomainError> {
        self.stored.write().await.token = Some(token.to_string());
        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<User>, DomainError> {
        Ok(self.profile().await)
    }

    async fn save_profile(&self, user: &User) -> Result<(), DomainError> {
        self.stored.write().await.profile = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut stored = self.stored.write().await;
        stored.token = None;
        stored.profile = None;
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
