pub mod audio;
pub mod config;
pub mod error;
pub mod flow;
pub mod remote;
pub mod report;
pub mod session;
pub mod upload;

pub use audio::{
    CaptureBackend, CaptureBackendConfig, CaptureBackendFactory, CaptureChunk, CaptureSource,
    MicrophoneBackend, ScriptedBackend,
};
pub use config::Config;
pub use error::{Error, Result};
pub use flow::{update, visible_screen, AppAction, AppState, Screen};
pub use remote::{
    AnalysisClient, AnalysisResult, HttpAnalysisClient, HttpMetadataStore, HttpObjectStore,
    MetadataStore, MoodScore, NewUploadRecord, ObjectStore, RecordStatus, UploadRecord,
};
pub use report::{CheckinReport, MoodTier, CRISIS_ADVISORY};
pub use session::{AudioAsset, CaptureSession, SessionConfig, SessionStatus};
pub use upload::{CheckinOutcome, UploadPipeline};
