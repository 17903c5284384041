use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::MetadataConfig;
use crate::error::{Error, Result};

/// Processing status of an upload record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Processed,
    Failed,
}

/// Durable metadata row linking a user, a stored audio object and its
/// processing status. Created only after the object write succeeded; never
/// deleted client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: Uuid,
    pub user_id: String,
    pub file_path: String,
    pub file_url: String,
    pub status: RecordStatus,
    pub duration_seconds: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert shape for a new upload record; the id is assigned remotely.
#[derive(Debug, Clone, Serialize)]
pub struct NewUploadRecord {
    pub user_id: String,
    pub file_path: String,
    pub file_url: String,
    pub status: RecordStatus,
    pub duration_seconds: u64,
}

/// Record store keyed by generated id.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a record; returns the stored representation with its id.
    async fn insert(&self, record: NewUploadRecord) -> Result<UploadRecord>;

    /// Update the processing status of an existing record.
    async fn update_status(&self, id: Uuid, status: RecordStatus) -> Result<()>;
}

/// Metadata store backed by a Supabase-style `rest/v1` table API.
pub struct HttpMetadataStore {
    client: reqwest::Client,
    base_url: String,
    table: String,
    api_key: String,
}

impl HttpMetadataStore {
    pub fn new(config: &MetadataConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::MetadataWrite(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn map_transport(e: reqwest::Error, operation: &str) -> Error {
        if e.is_timeout() {
            Error::timeout(operation)
        } else {
            Error::MetadataWrite(e.to_string())
        }
    }
}

#[async_trait]
impl MetadataStore for HttpMetadataStore {
    async fn insert(&self, record: NewUploadRecord) -> Result<UploadRecord> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await
            .map_err(|e| Self::map_transport(e, "record insert"))?;

        if !response.status().is_success() {
            return Err(Error::MetadataWrite(format!(
                "metadata store returned {}",
                response.status()
            )));
        }

        // The table API returns the inserted rows as an array.
        let mut rows: Vec<UploadRecord> = response
            .json()
            .await
            .map_err(|e| Error::MetadataWrite(format!("invalid insert response: {e}")))?;

        let inserted = rows
            .pop()
            .ok_or_else(|| Error::MetadataWrite("insert returned no representation".into()))?;

        info!("Inserted upload record {}", inserted.id);
        Ok(inserted)
    }

    async fn update_status(&self, id: Uuid, status: RecordStatus) -> Result<()> {
        let url = format!("{}/rest/v1/{}?id=eq.{}", self.base_url, self.table, id);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .map_err(|e| Self::map_transport(e, "record status update"))?;

        if !response.status().is_success() {
            return Err(Error::MetadataWrite(format!(
                "metadata store returned {}",
                response.status()
            )));
        }

        info!("Updated record {} to {:?}", id, status);
        Ok(())
    }
}
