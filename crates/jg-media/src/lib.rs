//! JobGrid Media Host Client
//!
//! Uploads user avatars, company logos, and resumes to an external media
//! host and returns the durable URL the host assigns. The host is treated
//! as a black box: `upload(file) -> url | error`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media host rejected upload: status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Media host unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Media host returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// A file received from a client, ready for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    /// Durable URL assigned by the host.
    pub url: String,
    /// File name as the client sent it (shown in the UI for resumes).
    pub original_name: String,
}

/// Configuration for the media host connection.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Upload endpoint, e.g. `https://media.example.com/upload`.
    pub upload_url: String,
    /// Optional bearer credential for the host.
    pub api_key: Option<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_url: "http://localhost:9000/upload".to_string(),
            api_key: None,
        }
    }
}

/// Media store trait
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a file, returning the durable URL the host assigned.
    async fn upload(&self, file: UploadFile) -> Result<StoredMedia, MediaError>;

    /// Store name for logging
    fn name(&self) -> &str;
}

/// HTTP media store posting multipart uploads to the configured host.
///
/// The host is expected to answer with a JSON body carrying the stored
/// URL under `secure_url` (Cloudinary-style) or `url`.
pub struct HttpMediaStore {
    client: reqwest::Client,
    config: MediaConfig,
}

impl HttpMediaStore {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn extract_url(body: &serde_json::Value) -> Option<String> {
        body.get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(|v| v.as_str())
            .map(String::from)
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, file: UploadFile) -> Result<StoredMedia, MediaError> {
        let original_name = file.file_name.clone();

        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| MediaError::InvalidResponse(format!("invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.client.post(&self.config.upload_url).multipart(form);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        let url = Self::extract_url(&body)
            .ok_or_else(|| MediaError::InvalidResponse("no url in host response".to_string()))?;

        debug!(url = %url, "media upload stored");
        Ok(StoredMedia { url, original_name })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_url_prefers_secure_url() {
        let body = serde_json::json!({
            "secure_url": "https://media.example.com/a.png",
            "url": "http://media.example.com/a.png"
        });
        assert_eq!(
            HttpMediaStore::extract_url(&body),
            Some("https://media.example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_extract_url_falls_back_to_url() {
        let body = serde_json::json!({ "url": "http://media.example.com/b.pdf" });
        assert_eq!(
            HttpMediaStore::extract_url(&body),
            Some("http://media.example.com/b.pdf".to_string())
        );
    }

    #[test]
    fn test_extract_url_missing() {
        let body = serde_json::json!({ "ok": true });
        assert_eq!(HttpMediaStore::extract_url(&body), None);
    }

    #[test]
    fn test_default_config_points_at_local_host() {
        let config = MediaConfig::default();
        assert_eq!(config.upload_url, "http://localhost:9000/upload");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_upload_file_empty() {
        let file = UploadFile::new("resume.pdf", "application/pdf", vec![]);
        assert!(file.is_empty());

        let file = UploadFile::new("resume.pdf", "application/pdf", vec![1, 2, 3]);
        assert!(!file.is_empty());
    }
}
