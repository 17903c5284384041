use std::io::Cursor;
use std::path::Path;

use crate::error::{Error, Result};

/// Wrap raw s16le PCM bytes in a WAV container.
///
/// A trailing odd byte is dropped.
pub fn encode_wav(pcm: &[u8], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| Error::Capture(format!("failed to create WAV writer: {e}")))?;

        for pair in pcm.chunks_exact(2) {
            let sample = i16::from_le_bytes([pair[0], pair[1]]);
            writer
                .write_sample(sample)
                .map_err(|e| Error::Capture(format!("failed to write WAV sample: {e}")))?;
        }

        writer
            .finalize()
            .map_err(|e| Error::Capture(format!("failed to finalize WAV data: {e}")))?;
    }

    Ok(cursor.into_inner())
}

/// Write a local WAV copy of a finished check-in.
pub fn write_wav_file(
    path: impl AsRef<Path>,
    pcm: &[u8],
    sample_rate: u32,
    channels: u16,
) -> Result<()> {
    let encoded = encode_wav(pcm, sample_rate, channels)?;
    std::fs::write(path.as_ref(), encoded)
        .map_err(|e| Error::Capture(format!("failed to write WAV file: {e}")))?;
    Ok(())
}
