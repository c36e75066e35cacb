//! WAV renderer — renders a digit sequence to mono samples or WAV bytes.

use tracing::warn;

use crate::options::{PlaybackOptions, TONE_DURATION};
use crate::tone;

use super::voice::DtmfVoice;

/// Render a single digit's tone at `options`.
pub fn render_tone(digit: u8, options: &PlaybackOptions) -> Result<Vec<f64>, crate::error::DtmfError> {
    let tone = tone::lookup(digit)?;
    options.validate()?;
    let mut voice = DtmfVoice::new(tone, options.volume, TONE_DURATION, options.sample_rate as f64);
    Ok(voice.render())
}

/// Render a digit sequence back to back, one tone-length slot per digit.
///
/// Digits without a tone are skipped (and logged), so they take no slot.
pub fn render_sequence(digits: &[u8], options: &PlaybackOptions) -> Vec<f64> {
    let mut out = Vec::new();
    for &digit in digits {
        match render_tone(digit, options) {
            Ok(samples) => out.extend(samples),
            Err(e) => warn!(digit, error = %e, "skipping digit"),
        }
    }
    out
}

/// Render a digit sequence to a WAV file as bytes (16-bit mono PCM).
pub fn render_wav(digits: &[u8], options: &PlaybackOptions) -> Vec<u8> {
    let samples = render_sequence(digits, options);
    encode_wav(&to_pcm_i16(&samples), options.sample_rate, 1)
}

/// Convert [-1, 1] float samples to i16, clamping anything outside.
pub fn to_pcm_i16(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16)
        .collect()
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
pub fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}
