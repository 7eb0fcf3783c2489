//! Backend REST client

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use dm_core::errors::{DomainError, DomainResult};
use dm_core::repositories::CredentialStore;
use dm_shared::BackendConfig;

use super::status::error_from_response;
use crate::InfrastructureError;

/// Client for the marketplace REST API
///
/// Requests made on behalf of the signed-in user carry the stored
/// credential as a bearer token.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: &BackendConfig) -> Result<Self, InfrastructureError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
            credentials: None,
        })
    }

    /// Attach the store the bearer token is read from
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// A request carrying the stored credential, if there is one
    pub(crate) async fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.request(method, path);
        let Some(store) = &self.credentials else {
            return builder;
        };
        match store.load_token().await {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!(error = %e, "Could not read credential for request");
                builder
            }
        }
    }

    /// Send and map any failure onto a domain error
    pub(crate) async fn send(&self, builder: RequestBuilder) -> DomainResult<Response> {
        let response = builder.send().await.map_err(InfrastructureError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), url = %url, "Backend request failed");
        Err(error_from_response(status, &body))
    }

    /// Send and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> DomainResult<T> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::upstream(format!("Malformed backend response: {e}")))
    }
}
