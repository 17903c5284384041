use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use voice_checkin::audio::wav;
use voice_checkin::{
    CaptureBackendFactory, CaptureSession, CaptureSource, CheckinReport, Config, Error,
    HttpAnalysisClient, HttpMetadataStore, HttpObjectStore, SessionConfig, UploadPipeline,
};

/// Voice wellness check-in client
#[derive(Debug, Parser)]
#[command(name = "voice-checkin", version, about)]
struct Cli {
    /// Path to the configuration file (without extension)
    #[arg(short, long, default_value = "config/voice-checkin")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record a check-in from the microphone, upload it and print the report
    Record {
        /// User the check-in belongs to
        #[arg(long)]
        user: String,

        /// Recording length in seconds
        #[arg(long, default_value_t = 10)]
        seconds: u64,

        /// Keep a local WAV copy under the configured recordings path
        #[arg(long)]
        keep_local: bool,
    },

    /// List available input devices
    Devices,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    info!("{} starting", config.service.name);

    match cli.command {
        Command::Record {
            user,
            seconds,
            keep_local,
        } => record(&config, &user, seconds, keep_local).await,
        Command::Devices => list_devices(),
    }
}

async fn record(config: &Config, user: &str, seconds: u64, keep_local: bool) -> Result<()> {
    let session_config = SessionConfig {
        sample_rate: config.audio.sample_rate,
        channels: config.audio.channels,
        chunk_duration_ms: config.audio.chunk_duration_ms,
        ..SessionConfig::default()
    };

    let backend = CaptureBackendFactory::create(
        CaptureSource::Microphone,
        session_config.backend_config(),
    )
    .context("Failed to create capture backend")?;

    let mut session = CaptureSession::new(session_config, backend);

    session.start().await.context("Failed to start recording")?;
    info!("Recording for {}s...", seconds);
    tokio::time::sleep(Duration::from_secs(seconds)).await;
    session.stop().await.context("Failed to stop recording")?;

    let checkin_id = session.checkin_id().to_string();
    let asset = session.take_asset().ok_or(Error::NoAsset)?;

    if keep_local {
        if asset.mime_type == "audio/L16" {
            std::fs::create_dir_all(&config.audio.recordings_path)
                .context("Failed to create recordings directory")?;
            let path =
                Path::new(&config.audio.recordings_path).join(format!("{checkin_id}.wav"));
            wav::write_wav_file(
                &path,
                &asset.bytes,
                config.audio.sample_rate,
                config.audio.channels,
            )?;
            info!("Saved local copy: {}", path.display());
        } else {
            warn!("Local copy skipped: {} is not raw PCM", asset.mime_type);
        }
    }

    let store = Arc::new(HttpObjectStore::new(&config.storage)?);
    let metadata = Arc::new(HttpMetadataStore::new(&config.metadata)?);
    let analysis = Arc::new(HttpAnalysisClient::new(&config.analysis)?);
    let pipeline = UploadPipeline::new(store, metadata, analysis);

    let outcome = pipeline
        .upload(&asset, user)
        .await
        .context("Check-in upload failed")?;

    let report = CheckinReport::from_result(&outcome.result);

    println!("{}", report.summary);
    println!("\nMood tier: {}", report.tier.label());
    if let Some(advisory) = &report.advisory {
        eprintln!("\n{advisory}");
    }

    Ok(())
}

fn list_devices() -> Result<()> {
    use cpal::traits::{DeviceTrait, HostTrait};

    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .context("Failed to enumerate input devices")?;

    for device in devices {
        let name = device.name().unwrap_or_else(|_| "<unknown>".to_string());
        println!("{name}");
    }

    Ok(())
}
