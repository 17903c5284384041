//! Clients for the external collaborators: the audio object store, the
//! upload-record metadata store and the analysis service. Each is behind a
//! trait so the upload pipeline can be exercised against in-process fakes.

pub mod analysis;
pub mod metadata;
pub mod storage;

pub use analysis::{AnalysisClient, AnalysisRequest, AnalysisResult, HttpAnalysisClient, MoodScore};
pub use metadata::{
    HttpMetadataStore, MetadataStore, NewUploadRecord, RecordStatus, UploadRecord,
};
pub use storage::{HttpObjectStore, ObjectStore};
