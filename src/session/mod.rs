//! Capture session management
//!
//! This module provides the `CaptureSession` abstraction that manages:
//! - Input device acquisition and release
//! - Chunk buffering in arrival order
//! - Elapsed-time reporting (one tick per second while recording)
//! - Finalizing the buffered chunks into a single audio asset

mod asset;
mod config;
mod session;

pub use asset::AudioAsset;
pub use config::SessionConfig;
pub use session::{CaptureSession, SessionStatus};
