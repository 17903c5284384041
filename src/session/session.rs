use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::asset::AudioAsset;
use super::config::SessionConfig;
use crate::audio::{CaptureBackend, CaptureChunk};
use crate::error::Result;

/// Lifecycle of a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Recording,
    Stopped,
}

/// A capture session that manages one capture-to-asset lifecycle
///
/// `start()` acquires the injected backend's input device and buffers the
/// chunks it produces; `stop()` releases the device and finalizes the
/// buffered chunks into a single [`AudioAsset`]. The elapsed counter ticks
/// once per second while recording and freezes at stop.
pub struct CaptureSession {
    config: SessionConfig,

    /// Capture backend; injected so tests can substitute a scripted one
    backend: Box<dyn CaptureBackend>,

    status: SessionStatus,

    /// Signals the ticker task to stop counting
    is_recording: Arc<AtomicBool>,

    /// Whole seconds recorded so far; frozen at stop
    elapsed_secs: Arc<AtomicU64>,

    /// Chunks in arrival order (append-only while recording)
    chunks: Arc<Mutex<Vec<CaptureChunk>>>,

    drain_task: Option<JoinHandle<()>>,
    ticker_task: Option<JoinHandle<()>>,

    /// Finalized asset, present after a successful stop
    asset: Option<AudioAsset>,
}

impl CaptureSession {
    pub fn new(config: SessionConfig, backend: Box<dyn CaptureBackend>) -> Self {
        Self {
            config,
            backend,
            status: SessionStatus::Idle,
            is_recording: Arc::new(AtomicBool::new(false)),
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            chunks: Arc::new(Mutex::new(Vec::new())),
            drain_task: None,
            ticker_task: None,
            asset: None,
        }
    }

    /// Start recording
    ///
    /// Acquires the input device; a `PermissionDenied` failure from the
    /// backend propagates to the caller unchanged. Calling start while
    /// already recording is a no-op.
    pub async fn start(&mut self) -> Result<()> {
        if self.status == SessionStatus::Recording {
            warn!("Recording already started");
            return Ok(());
        }

        info!("Starting check-in recording: {}", self.config.checkin_id);

        // Nothing is held yet if this fails, so there is no cleanup path.
        let mut chunk_rx = self.backend.start().await?;

        {
            let mut chunks = self.chunks.lock().await;
            chunks.clear();
        }
        self.asset = None;
        self.elapsed_secs.store(0, Ordering::SeqCst);
        self.is_recording.store(true, Ordering::SeqCst);

        // Drain task: append every chunk in arrival order until the backend
        // closes the channel.
        let chunks = Arc::clone(&self.chunks);
        let drain = tokio::spawn(async move {
            while let Some(chunk) = chunk_rx.recv().await {
                chunks.lock().await.push(chunk);
            }
        });
        self.drain_task = Some(drain);

        // Ticker task: one increment per second while recording.
        let is_recording = Arc::clone(&self.is_recording);
        let elapsed = Arc::clone(&self.elapsed_secs);
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately; consume it so the
            // counter starts at zero.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !is_recording.load(Ordering::SeqCst) {
                    break;
                }
                elapsed.fetch_add(1, Ordering::SeqCst);
            }
        });
        self.ticker_task = Some(ticker);

        self.status = SessionStatus::Recording;
        Ok(())
    }

    /// Stop recording and finalize the asset
    ///
    /// Releases the device, drains any remaining chunks and concatenates
    /// them into the session's `AudioAsset`. Calling stop when not
    /// recording is a no-op.
    pub async fn stop(&mut self) -> Result<()> {
        if self.status != SessionStatus::Recording {
            return Ok(());
        }

        info!("Stopping check-in recording: {}", self.config.checkin_id);

        // Freeze the elapsed counter before anything fallible runs.
        self.is_recording.store(false, Ordering::SeqCst);
        if let Some(task) = self.ticker_task.take() {
            task.abort();
        }

        // Release the device on every exit path. Stopping the backend also
        // closes the chunk channel, which lets the drain task finish.
        let stop_result = self.backend.stop().await;

        match &stop_result {
            Ok(()) => {
                if let Some(task) = self.drain_task.take() {
                    if let Err(e) = task.await {
                        error!("Chunk drain task panicked: {}", e);
                    }
                }
            }
            Err(e) => {
                // The channel may never close; abandon the drain rather
                // than hang. Chunks received so far are still finalized.
                warn!("Backend stop failed, abandoning chunk drain: {}", e);
                if let Some(task) = self.drain_task.take() {
                    task.abort();
                }
            }
        }

        let bytes: Vec<u8> = {
            let mut chunks = self.chunks.lock().await;
            chunks.drain(..).flat_map(|c| c.bytes).collect()
        };
        let duration_seconds = self.elapsed_secs.load(Ordering::SeqCst);

        info!(
            "Finalized audio asset: {} bytes, {}s",
            bytes.len(),
            duration_seconds
        );

        self.asset = Some(AudioAsset {
            mime_type: self.backend.mime_type().to_string(),
            bytes,
            duration_seconds,
        });
        self.status = SessionStatus::Stopped;

        stop_result
    }

    /// Discard a finalized asset without uploading
    ///
    /// No-op while recording; stop first.
    pub async fn discard(&mut self) {
        if self.status == SessionStatus::Recording {
            warn!("Cannot discard while recording");
            return;
        }

        self.chunks.lock().await.clear();
        self.asset = None;
        self.status = SessionStatus::Idle;
        info!("Discarded recording: {}", self.config.checkin_id);
    }

    /// Hand the finalized asset to the caller (e.g. the upload pipeline).
    ///
    /// Returns `None` when nothing was finalized or the asset was already
    /// taken or discarded; the session resets to idle on success.
    pub fn take_asset(&mut self) -> Option<AudioAsset> {
        let asset = self.asset.take();
        if asset.is_some() {
            self.status = SessionStatus::Idle;
        }
        asset
    }

    pub fn asset(&self) -> Option<&AudioAsset> {
        self.asset.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whole seconds recorded; ticks while recording, frozen after stop.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_secs.load(Ordering::SeqCst)
    }

    /// Whether the backend has released the input device.
    pub fn device_released(&self) -> bool {
        !self.backend.is_capturing()
    }

    pub fn checkin_id(&self) -> &str {
        &self.config.checkin_id
    }
}
