use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};

/// Request sent to the analysis service
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub audio_id: Uuid,
    pub audio_url: String,
}

/// Mood score derived from sentiment analysis of the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodScore {
    /// Overall mood on a 0..=5 scale
    pub overall: f32,
    /// Number of positive sentiment segments
    pub positive: u32,
    /// Number of negative sentiment segments
    pub negative: u32,
    #[serde(default)]
    pub neutral: u32,
}

/// Transcript and derived signals returned by the analysis service.
/// Transient; consumed once and not retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub transcript: String,
    pub mood_score: MoodScore,
    pub crisis_detected: bool,
}

/// Remote transcription-and-mood service.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Request analysis of a stored audio object. No automatic retry; a
    /// timeout surfaces as `Error::NetworkTimeout`.
    async fn analyze(&self, record_id: Uuid, audio_url: &str) -> Result<AnalysisResult>;
}

/// Analysis client speaking the service's JSON-over-HTTP protocol.
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        // Transcription is slow; the deadline covers the whole request.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::AnalysisRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, record_id: Uuid, audio_url: &str) -> Result<AnalysisResult> {
        let url = format!("{}/api/transcribe", self.base_url);
        let request = AnalysisRequest {
            audio_id: record_id,
            audio_url: audio_url.to_string(),
        };

        info!("Requesting analysis for record {}", record_id);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout("analysis request")
                } else {
                    Error::AnalysisRequest(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(Error::AnalysisRequest(format!(
                "analysis service returned {}",
                response.status()
            )));
        }

        let result: AnalysisResult = response
            .json()
            .await
            .map_err(|e| Error::AnalysisRequest(format!("invalid analysis response: {e}")))?;

        info!(
            "Analysis complete for record {} (mood {:.1}/5, crisis={})",
            record_id, result.mood_score.overall, result.crisis_detected
        );

        Ok(result)
    }
}
