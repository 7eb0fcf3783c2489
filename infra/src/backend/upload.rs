//! Image uploads to the asset host

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use dm_shared::BackendConfig;

use crate::InfrastructureError;

/// Public URL in an asset host response
///
/// Accepts `{"data": {"url" | "display_url": ...}}` and a top-level `url`.
pub fn extract_image_url(body: &Value) -> Option<String> {
    let data = body.get("data").unwrap_or(body);
    ["url", "display_url"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_str))
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
        .map(str::to_string)
}

/// Client for the image hosting service
pub struct ImageUploader {
    http: Client,
    upload_url: String,
    api_key: String,
}

impl ImageUploader {
    /// Create an uploader from the backend configuration
    ///
    /// Fails when the upload URL or key is not configured.
    pub fn from_config(config: &BackendConfig) -> Result<Self, InfrastructureError> {
        let upload_url = config
            .image_upload_url
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| InfrastructureError::Config("IMAGE_UPLOAD_URL not set".to_string()))?;
        let api_key = config
            .image_upload_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| InfrastructureError::Config("IMAGE_UPLOAD_KEY not set".to_string()))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            upload_url,
            api_key,
        })
    }

    /// Upload image bytes, returning the public URL
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, InfrastructureError> {
        if bytes.is_empty() {
            return Err(InfrastructureError::Upload("image is empty".to_string()));
        }
        let form = Form::new().part("image", Part::bytes(bytes).file_name(file_name.to_string()));

        let response = self
            .http
            .post(&self.upload_url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Upload(format!(
                "asset host returned {}: {}",
                status.as_u16(),
                super::status::extract_message(status, &body)
            )));
        }

        let body: Value = response.json().await?;
        let url = extract_image_url(&body)
            .ok_or_else(|| InfrastructureError::Upload("response carried no image URL".to_string()))?;
        info!(file_name, url = %url, "Image uploaded");
        Ok(url)
    }

    /// Upload a file from disk
    pub async fn upload_file(&self, path: &Path) -> Result<String, InfrastructureError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image");
        self.upload(file_name, bytes).await
    }
}
