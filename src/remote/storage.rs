use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::info;

use crate::config::StorageConfig;
use crate::error::{Error, Result};

/// Durable blob store for audio objects.
///
/// Injected into the upload pipeline so tests can substitute an in-memory
/// fake.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `key`; returns the remote path of the object.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;

    /// Publicly resolvable URL for a stored object.
    fn public_url(&self, key: &str) -> String;
}

/// Object store backed by a Supabase-style storage REST API.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::StorageWrite(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key);
        let size = bytes.len();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout("object upload")
                } else {
                    Error::StorageWrite(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(Error::StorageWrite(format!(
                "storage returned {}",
                response.status()
            )));
        }

        info!("Uploaded {} bytes to {}/{}", size, self.bucket, key);
        Ok(format!("{}/{}", self.bucket, key))
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }
}
