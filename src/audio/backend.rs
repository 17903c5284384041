use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

/// One encoded audio chunk as delivered by a capture backend.
///
/// Chunks are opaque to the session: they are appended in arrival order
/// and the finalized asset is exactly their concatenation.
#[derive(Debug, Clone)]
pub struct CaptureChunk {
    pub bytes: Vec<u8>,
}

/// Configuration for a capture backend
#[derive(Debug, Clone)]
pub struct CaptureBackendConfig {
    /// Target sample rate (input is resampled if needed)
    pub sample_rate: u32,
    /// Target channel count (the microphone backend always produces mono)
    pub channels: u16,
    /// Duration of each emitted chunk in milliseconds
    pub chunk_duration_ms: u64,
}

impl Default for CaptureBackendConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            channels: 1,
            chunk_duration_ms: 100,
        }
    }
}

/// Audio capture backend trait
///
/// Implementations:
/// - Microphone: cpal default input device
/// - Scripted: replays canned chunks (tests, demos)
#[async_trait]
pub trait CaptureBackend: Send {
    /// Acquire the input device and start capturing.
    ///
    /// Returns a channel receiver that delivers encoded chunks in
    /// production order. Fails with `Error::PermissionDenied` when access
    /// is declined or no input device exists.
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureChunk>>;

    /// Release the input device and close the chunk channel. Idempotent.
    async fn stop(&mut self) -> Result<()>;

    /// Whether the device is currently held
    fn is_capturing(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;

    /// Content type of the produced chunks
    fn mime_type(&self) -> &str;
}

/// Where the audio comes from
#[derive(Debug, Clone)]
pub enum CaptureSource {
    /// Default microphone via cpal
    Microphone,
    /// Canned chunks replayed in order
    Scripted(Vec<Vec<u8>>),
}

/// Capture backend factory
pub struct CaptureBackendFactory;

impl CaptureBackendFactory {
    pub fn create(
        source: CaptureSource,
        config: CaptureBackendConfig,
    ) -> Result<Box<dyn CaptureBackend>> {
        match source {
            CaptureSource::Microphone => {
                let backend = super::microphone::MicrophoneBackend::new(config);
                Ok(Box::new(backend))
            }
            CaptureSource::Scripted(chunks) => {
                let backend = super::scripted::ScriptedBackend::new(chunks);
                Ok(Box::new(backend))
            }
        }
    }
}
