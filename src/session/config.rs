use serde::{Deserialize, Serialize};

use crate::audio::CaptureBackendConfig;

/// Configuration for a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique check-in identifier (e.g. "checkin-7f3a...")
    pub checkin_id: String,

    /// Sample rate for captured audio
    pub sample_rate: u32,

    /// Number of audio channels (1 = mono)
    pub channels: u16,

    /// Duration of each capture chunk in milliseconds
    pub chunk_duration_ms: u64,
}

impl SessionConfig {
    pub fn backend_config(&self) -> CaptureBackendConfig {
        CaptureBackendConfig {
            sample_rate: self.sample_rate,
            channels: self.channels,
            chunk_duration_ms: self.chunk_duration_ms,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            checkin_id: format!("checkin-{}", uuid::Uuid::new_v4()),
            sample_rate: 16000,
            channels: 1,
            chunk_duration_ms: 100,
        }
    }
}
