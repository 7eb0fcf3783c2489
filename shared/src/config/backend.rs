//! Backend REST API and asset host configuration

use serde::{Deserialize, Serialize};

/// Backend collaborator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Image upload endpoint of the asset host
    #[serde(default)]
    pub image_upload_url: Option<String>,

    /// API key for the asset host
    #[serde(default)]
    pub image_upload_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

impl BackendConfig {
    /// Create a configuration pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: default_timeout(),
            image_upload_url: None,
            image_upload_key: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Build an absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Override fields from environment variables, keeping `fallback` values
    pub fn from_env_or(fallback: Self) -> Self {
        let base_url = std::env::var("API_BASE_URL").unwrap_or(fallback.base_url);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: std::env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback.request_timeout_secs),
            image_upload_url: std::env::var("IMAGE_UPLOAD_URL")
                .ok()
                .or(fallback.image_upload_url),
            image_upload_key: std::env::var("IMAGE_UPLOAD_KEY")
                .ok()
                .or(fallback.image_upload_key),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = BackendConfig::new("https://api.example.com/");
        assert_eq!(config.url("/bookings"), "https://api.example.com/bookings");
        assert_eq!(config.url("users/me"), "https://api.example.com/users/me");
    }
}
