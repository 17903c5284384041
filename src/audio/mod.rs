pub mod backend;
pub mod microphone;
pub mod scripted;
pub mod wav;

pub use backend::{
    CaptureBackend, CaptureBackendConfig, CaptureBackendFactory, CaptureChunk, CaptureSource,
};
pub use microphone::MicrophoneBackend;
pub use scripted::ScriptedBackend;
