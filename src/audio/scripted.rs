use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use super::backend::{CaptureBackend, CaptureChunk};
use crate::error::Result;

/// Capture backend that replays canned chunks in order.
///
/// Used by tests and demos in place of a real input device. All chunks are
/// queued on `start()`; the channel stays open until `stop()` releases it,
/// mirroring a device that has gone quiet but is still held.
pub struct ScriptedBackend {
    chunks: Vec<Vec<u8>>,
    /// Deliver only the first N chunks and then drop the channel, as if the
    /// stream died mid-recording. The device stays held until `stop()`.
    fail_after: Option<usize>,
    sender: Option<mpsc::Sender<CaptureChunk>>,
    acquired: bool,
}

impl ScriptedBackend {
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks,
            fail_after: None,
            sender: None,
            acquired: false,
        }
    }

    /// Simulate a stream failure after `n` delivered chunks.
    pub fn with_failure_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }
}

#[async_trait]
impl CaptureBackend for ScriptedBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureChunk>> {
        let deliver = match self.fail_after {
            Some(n) => &self.chunks[..n.min(self.chunks.len())],
            None => &self.chunks[..],
        };

        let (tx, rx) = mpsc::channel(deliver.len().max(1));
        for bytes in deliver {
            // Capacity covers every scripted chunk, so this cannot fail.
            let _ = tx.try_send(CaptureChunk {
                bytes: bytes.clone(),
            });
        }

        // On a simulated failure the sender is dropped here and the channel
        // closes early; otherwise it stays open until stop().
        if self.fail_after.is_none() {
            self.sender = Some(tx);
        }

        self.acquired = true;
        info!("Scripted backend started ({} chunks)", deliver.len());
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.sender = None;
        self.acquired = false;
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.acquired
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn mime_type(&self) -> &str {
        "audio/L16"
    }
}
