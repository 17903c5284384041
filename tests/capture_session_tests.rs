// Integration tests for the capture session lifecycle.
//
// A scripted backend stands in for the microphone so chunk ordering,
// idempotent stop and device release can be verified deterministically.

use std::time::Duration;

use anyhow::Result;
use voice_checkin::{CaptureSession, ScriptedBackend, SessionConfig, SessionStatus};

fn session_with_chunks(chunks: Vec<Vec<u8>>) -> CaptureSession {
    let backend = Box::new(ScriptedBackend::new(chunks));
    CaptureSession::new(SessionConfig::default(), backend)
}

#[tokio::test]
async fn test_asset_is_concatenation_of_chunks_in_arrival_order() -> Result<()> {
    let mut session = session_with_chunks(vec![
        b"alpha".to_vec(),
        b"beta".to_vec(),
        b"gamma".to_vec(),
    ]);

    session.start().await?;
    assert_eq!(session.status(), SessionStatus::Recording);

    session.stop().await?;
    assert_eq!(session.status(), SessionStatus::Stopped);

    let asset = session.take_asset().expect("asset should be finalized");
    assert_eq!(asset.bytes, b"alphabetagamma".to_vec());
    assert_eq!(asset.mime_type, "audio/L16");

    // Taking the asset resets the session.
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(session.take_asset().is_none());

    Ok(())
}

#[tokio::test]
async fn test_empty_chunk_is_appended_like_any_other() -> Result<()> {
    let mut session = session_with_chunks(vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]);

    session.start().await?;
    session.stop().await?;

    let asset = session.take_asset().expect("asset should be finalized");
    assert_eq!(asset.bytes, b"ab".to_vec());

    Ok(())
}

#[tokio::test]
async fn test_stop_is_idempotent() -> Result<()> {
    let mut session = session_with_chunks(vec![b"chunk".to_vec()]);

    session.start().await?;
    session.stop().await?;
    // Second stop: no additional side effects, no error.
    session.stop().await?;

    assert_eq!(session.status(), SessionStatus::Stopped);
    let asset = session.take_asset().expect("asset survives a second stop");
    assert_eq!(asset.bytes, b"chunk".to_vec());

    Ok(())
}

#[tokio::test]
async fn test_stop_without_start_is_a_noop() -> Result<()> {
    let mut session = session_with_chunks(vec![b"chunk".to_vec()]);

    session.stop().await?;

    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(session.take_asset().is_none());

    Ok(())
}

#[tokio::test]
async fn test_start_while_recording_is_a_noop() -> Result<()> {
    let mut session = session_with_chunks(vec![b"chunk".to_vec()]);

    session.start().await?;
    session.start().await?;
    assert_eq!(session.status(), SessionStatus::Recording);

    session.stop().await?;
    let asset = session.take_asset().expect("asset should be finalized");
    assert_eq!(asset.bytes, b"chunk".to_vec());

    Ok(())
}

#[tokio::test]
async fn test_discard_after_stop_clears_the_asset() -> Result<()> {
    let mut session = session_with_chunks(vec![b"chunk".to_vec()]);

    session.start().await?;
    session.stop().await?;
    session.discard().await;

    // A subsequent upload attempt has nothing to take.
    assert!(session.take_asset().is_none());
    assert_eq!(session.status(), SessionStatus::Idle);

    Ok(())
}

#[tokio::test]
async fn test_device_released_after_stop() -> Result<()> {
    let mut session = session_with_chunks(vec![b"chunk".to_vec()]);

    session.start().await?;
    assert!(!session.device_released());

    session.stop().await?;
    assert!(session.device_released());

    Ok(())
}

#[tokio::test]
async fn test_device_released_after_mid_recording_failure() -> Result<()> {
    // The stream dies after delivering one of three chunks; stop must still
    // release the device and finalize what arrived.
    let backend = Box::new(
        ScriptedBackend::new(vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()])
            .with_failure_after(1),
    );
    let mut session = CaptureSession::new(SessionConfig::default(), backend);

    session.start().await?;
    session.stop().await?;

    assert!(session.device_released());
    let asset = session.take_asset().expect("partial asset is finalized");
    assert_eq!(asset.bytes, b"one".to_vec());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_ticks_once_per_second_and_freezes_at_stop() -> Result<()> {
    let mut session = session_with_chunks(vec![b"chunk".to_vec()]);

    session.start().await?;
    // Let the ticker task initialize its interval before advancing time.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
    assert_eq!(session.elapsed_seconds(), 0);

    for _ in 0..3 {
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }
    assert_eq!(session.elapsed_seconds(), 3);

    session.stop().await?;

    // Frozen after stop.
    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(session.elapsed_seconds(), 3);

    let asset = session.take_asset().expect("asset should be finalized");
    assert_eq!(asset.duration_seconds, 3);

    Ok(())
}
