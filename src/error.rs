use thiserror::Error;

/// Errors surfaced by the check-in client.
///
/// Every variant leaves the caller in a recoverable state: a failed upload
/// keeps the audio asset, a failed analysis leaves the record pending.
#[derive(Error, Debug)]
pub enum Error {
    /// Microphone access was declined or no input device exists.
    #[error("microphone access denied: {reason}")]
    PermissionDenied { reason: String },

    /// Audio capture failed after the device was acquired.
    #[error("audio capture failed: {0}")]
    Capture(String),

    /// Writing the audio object to durable storage failed. The asset is
    /// not consumed on this path; the caller keeps it for retry.
    #[error("failed to write audio object to storage: {0}")]
    StorageWrite(String),

    /// Persisting the check-in record failed. The uploaded object remains
    /// in storage without a record (no compensating rollback).
    #[error("failed to persist check-in record: {0}")]
    MetadataWrite(String),

    /// The analysis service request failed; the record stays pending.
    #[error("analysis request failed: {0}")]
    AnalysisRequest(String),

    /// A network operation exceeded its configured deadline.
    #[error("network operation timed out: {operation}")]
    NetworkTimeout { operation: String },

    /// The pipeline accepts exactly one in-flight asset at a time.
    #[error("an upload is already in flight")]
    UploadInFlight,

    /// Upload was attempted without a finalized recording.
    #[error("no finalized recording to upload")]
    NoAsset,
}

impl Error {
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            reason: reason.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::NetworkTimeout {
            operation: operation.into(),
        }
    }

    /// Whether the failure is a device-permission problem rather than a
    /// transient capture or network fault.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
