/// Finalized audio from one capture session.
///
/// `bytes` is exactly the concatenation of the captured chunks in arrival
/// order. The asset is owned by the session until the caller takes it for
/// upload.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub duration_seconds: u64,
}

impl AudioAsset {
    /// File extension used when deriving a storage key.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "audio/L16" => "pcm",
            "audio/wav" | "audio/wave" => "wav",
            "audio/webm" => "webm",
            _ => "bin",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
