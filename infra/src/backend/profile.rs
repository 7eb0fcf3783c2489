//! Profile lookup and federated sign-in

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use dm_core::domain::entities::User;
use dm_core::errors::{DomainError, DomainResult};
use dm_core::services::session::ProfileFetcher;

use super::client::BackendClient;

/// Profile handed over by a third-party identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedIdentity {
    pub email: String,
    pub name: Option<String>,
    pub photo: Option<String>,
    /// The provider's user id
    pub uid: String,
}

impl BackendClient {
    /// Trade a federated identity for a backend credential
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - the credential, ready for `SessionManager::login`
    pub async fn exchange_federated_identity(&self, identity: &FederatedIdentity) -> DomainResult<String> {
        let body: Value = self
            .send_json(self.request(Method::POST, "auth/jwt").json(identity))
            .await?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::upstream("Token exchange returned no token"))?;
        info!(email = %identity.email, "Federated identity exchanged");
        Ok(token.to_string())
    }
}

#[async_trait]
impl ProfileFetcher for BackendClient {
    async fn fetch_profile(&self, token: &str) -> Result<User, DomainError> {
        let body: Value = self
            .send_json(self.request(Method::GET, "users/me").bearer_auth(token))
            .await?;
        // Some deployments wrap the profile as {"user": {...}}
        let profile = body.get("user").cloned().unwrap_or(body);
        serde_json::from_value(profile)
            .map_err(|e| DomainError::upstream(format!("Malformed profile: {e}")))
    }
}
