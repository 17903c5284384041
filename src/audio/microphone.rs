use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::backend::{CaptureBackend, CaptureBackendConfig, CaptureChunk};
use crate::error::{Error, Result};

/// Wrapper to make cpal::Stream movable across threads. The handle is only
/// ever used from one thread at a time.
struct SendStream(Stream);
unsafe impl Send for SendStream {}

/// Microphone capture via the default cpal input device.
///
/// Input is downmixed to mono, resampled to the target rate, quantized to
/// 16-bit PCM (little-endian) and batched into fixed-duration chunks.
pub struct MicrophoneBackend {
    config: CaptureBackendConfig,
    stream: Option<SendStream>,
}

impl MicrophoneBackend {
    pub fn new(config: CaptureBackendConfig) -> Self {
        Self {
            config,
            stream: None,
        }
    }
}

#[async_trait]
impl CaptureBackend for MicrophoneBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureChunk>> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::permission_denied("no input device available"))?;

        let supported = device
            .default_input_config()
            .map_err(|e| Error::permission_denied(format!("input device unavailable: {e}")))?;

        let sample_format = supported.sample_format();
        let stream_config: StreamConfig = supported.into();
        let native_rate = stream_config.sample_rate.0;
        let native_channels = stream_config.channels as usize;
        let target_rate = self.config.sample_rate;

        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        info!(
            "Opening microphone '{}': {}Hz {}ch -> {}Hz mono",
            device_name, native_rate, native_channels, target_rate
        );

        let samples_per_chunk =
            (target_rate as u64 * self.config.chunk_duration_ms / 1000).max(1) as usize;

        let (tx, rx) = mpsc::channel::<CaptureChunk>(64);
        let err_fn = |e: cpal::StreamError| error!("Microphone stream error: {}", e);

        let stream = match sample_format {
            SampleFormat::F32 => {
                let mut batch = ChunkBatcher::new(tx, samples_per_chunk);
                device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            let mono = to_mono(data, native_channels);
                            let resampled = resample(&mono, native_rate, target_rate);
                            batch.push(&resampled);
                        },
                        err_fn,
                        None,
                    )
                    .map_err(map_build_error)?
            }
            SampleFormat::I16 => {
                let mut batch = ChunkBatcher::new(tx, samples_per_chunk);
                device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            let floats: Vec<f32> =
                                data.iter().map(|&s| s as f32 / i16::MAX as f32).collect();
                            let mono = to_mono(&floats, native_channels);
                            let resampled = resample(&mono, native_rate, target_rate);
                            batch.push(&resampled);
                        },
                        err_fn,
                        None,
                    )
                    .map_err(map_build_error)?
            }
            other => {
                return Err(Error::Capture(format!(
                    "unsupported sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Capture(format!("failed to start stream: {e}")))?;

        self.stream = Some(SendStream(stream));
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        // Dropping the stream releases the device and drops the sender held
        // by the callback, which closes the chunk channel.
        if self.stream.take().is_some() {
            info!("Microphone released");
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.stream.is_some()
    }

    fn name(&self) -> &str {
        "microphone"
    }

    fn mime_type(&self) -> &str {
        "audio/L16"
    }
}

/// Accumulates mono f32 samples and emits fixed-size PCM chunks.
struct ChunkBatcher {
    tx: mpsc::Sender<CaptureChunk>,
    samples_per_chunk: usize,
    pending: Vec<i16>,
}

impl ChunkBatcher {
    fn new(tx: mpsc::Sender<CaptureChunk>, samples_per_chunk: usize) -> Self {
        Self {
            tx,
            samples_per_chunk,
            pending: Vec::with_capacity(samples_per_chunk),
        }
    }

    fn push(&mut self, samples: &[f32]) {
        for &s in samples {
            let q = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            self.pending.push(q);
        }

        while self.pending.len() >= self.samples_per_chunk {
            let rest = self.pending.split_off(self.samples_per_chunk);
            let chunk: Vec<u8> = self
                .pending
                .iter()
                .flat_map(|s| s.to_le_bytes())
                .collect();
            self.pending = rest;

            // The cpal callback must not block; a full channel means the
            // consumer stalled, and the chunk is dropped.
            if let Err(e) = self.tx.try_send(CaptureChunk { bytes: chunk }) {
                warn!("Dropping audio chunk: {}", e);
            }
        }
    }
}

fn map_build_error(e: cpal::BuildStreamError) -> Error {
    match e {
        cpal::BuildStreamError::DeviceNotAvailable => {
            Error::permission_denied("input device not available")
        }
        other => Error::Capture(format!("failed to build input stream: {other}")),
    }
}

/// Convert interleaved multi-channel audio to mono by averaging channels.
fn to_mono(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return data.to_vec();
    }
    data.chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Linear interpolation resampler (e.g. 48000 -> 16000 Hz).
fn resample(data: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate || data.is_empty() {
        return data.to_vec();
    }
    let ratio = source_rate as f64 / target_rate as f64;
    let output_len = (data.len() as f64 / ratio) as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_idx = i as f64 * ratio;
        let idx_floor = src_idx.floor() as usize;
        let idx_ceil = (idx_floor + 1).min(data.len() - 1);
        let frac = src_idx - idx_floor as f64;
        let sample = data[idx_floor] as f64 * (1.0 - frac) + data[idx_ceil] as f64 * frac;
        output.push(sample as f32);
    }
    output
}
