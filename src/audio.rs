//! Audio output boundary.
//!
//! `play_tone` turns a digit into a [`ScheduledTone`] against an explicit
//! [`AudioDevice`] handle. Playback is best-effort: failures are logged and
//! swallowed so drawing and later digits carry on.

use tracing::{error, info};

use crate::dsp::renderer::{encode_wav, to_pcm_i16};
use crate::dsp::voice::DtmfVoice;
use crate::error::{AudioError, DtmfError};
use crate::options::{PlaybackOptions, TONE_DURATION};
use crate::tone::{self, ToneDefinition};

/// One tone as handed to a device: frequencies, gain and its time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    pub digit: u8,
    pub tone: ToneDefinition,
    pub volume: f64,
    pub sample_rate: u32,
    /// Device time (seconds) at which both oscillators start.
    pub start: f64,
    /// Device time at which gain drops to zero and both oscillators stop.
    pub stop: f64,
}

impl ScheduledTone {
    /// Schedule `digit` to sound for one tone length from `now`.
    pub fn new(digit: u8, options: &PlaybackOptions, now: f64) -> Result<Self, DtmfError> {
        let tone = tone::lookup(digit)?;
        options
            .validate()
            .map_err(|e| AudioError::InvalidOptions(e.to_string()))?;
        Ok(ScheduledTone {
            digit,
            tone,
            volume: options.volume,
            sample_rate: options.sample_rate,
            start: now,
            stop: now + TONE_DURATION,
        })
    }

    /// Build the voice that renders this tone, in tone-local time.
    pub fn voice(&self) -> DtmfVoice {
        DtmfVoice::new(
            self.tone,
            self.volume,
            self.stop - self.start,
            self.sample_rate as f64,
        )
    }
}

/// A platform audio output: a clock plus a way to sound a scheduled tone.
pub trait AudioDevice {
    /// Device clock in seconds.
    fn current_time(&self) -> f64;

    fn play(&mut self, tone: &ScheduledTone) -> Result<(), AudioError>;
}

/// Play `digit` on `device`. Returns whether the tone was handed over.
///
/// Errors never propagate; they are logged here.
pub fn play_tone<D: AudioDevice + ?Sized>(device: &mut D, digit: u8, options: &PlaybackOptions) -> bool {
    info!(digit, "tone");
    let scheduled = match ScheduledTone::new(digit, options, device.current_time()) {
        Ok(s) => s,
        Err(e) => {
            error!(digit, error = %e, "cannot schedule tone");
            return false;
        }
    };
    match device.play(&scheduled) {
        Ok(()) => true,
        Err(e) => {
            error!(digit, error = %e, "audio playback failed");
            false
        }
    }
}

/// Renders tones into an in-memory timeline instead of a speaker.
///
/// The clock sits at the end of the timeline, so tones played one after
/// another land back to back. A [`clock_only`](OfflineDevice::clock_only)
/// device advances the same clock but keeps neither samples nor history.
#[derive(Debug, Clone)]
pub struct OfflineDevice {
    sample_rate: u32,
    keep_audio: bool,
    /// End of the timeline, in samples.
    cursor: usize,
    buffer: Vec<f64>,
    history: Vec<ScheduledTone>,
}

impl OfflineDevice {
    pub fn new(sample_rate: u32) -> Self {
        OfflineDevice {
            sample_rate,
            keep_audio: true,
            cursor: 0,
            buffer: Vec::new(),
            history: Vec::new(),
        }
    }

    /// A device that only keeps time, for sessions nobody records.
    pub fn clock_only(sample_rate: u32) -> Self {
        OfflineDevice {
            keep_audio: false,
            ..Self::new(sample_rate)
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.buffer
    }

    /// Every tone played so far, in order.
    pub fn history(&self) -> &[ScheduledTone] {
        &self.history
    }

    /// Encode the timeline as 16-bit mono WAV bytes.
    pub fn to_wav(&self) -> Vec<u8> {
        encode_wav(&to_pcm_i16(&self.buffer), self.sample_rate, 1)
    }
}

impl AudioDevice for OfflineDevice {
    fn current_time(&self) -> f64 {
        self.cursor as f64 / self.sample_rate as f64
    }

    fn play(&mut self, tone: &ScheduledTone) -> Result<(), AudioError> {
        if tone.sample_rate != self.sample_rate {
            return Err(AudioError::SampleRateMismatch {
                expected: self.sample_rate,
                found: tone.sample_rate,
            });
        }
        let offset = (tone.start * self.sample_rate as f64).round() as usize;
        let mut voice = tone.voice();
        let end = offset + voice.len_samples();
        self.cursor = self.cursor.max(end);
        if !self.keep_audio {
            return Ok(());
        }
        let rendered = voice.render();
        if self.buffer.len() < end {
            self.buffer.resize(end, 0.0);
        }
        for (slot, sample) in self.buffer[offset..].iter_mut().zip(rendered) {
            *slot += sample;
        }
        self.history.push(*tone);
        Ok(())
    }
}

/// Speaker output through the default device.
#[cfg(feature = "playback")]
pub struct RodioDevice {
    _stream: rodio::OutputStream,
    sink: rodio::Sink,
    opened: std::time::Instant,
}

#[cfg(feature = "playback")]
impl RodioDevice {
    pub fn open() -> Result<Self, AudioError> {
        let (stream, handle) =
            rodio::OutputStream::try_default().map_err(|e| AudioError::Unavailable(e.to_string()))?;
        let sink = rodio::Sink::try_new(&handle).map_err(|e| AudioError::Backend(e.to_string()))?;
        Ok(RodioDevice {
            _stream: stream,
            sink,
            opened: std::time::Instant::now(),
        })
    }

    /// Block until every queued tone has finished.
    pub fn drain(&self) {
        self.sink.sleep_until_end();
    }
}

#[cfg(feature = "playback")]
impl AudioDevice for RodioDevice {
    fn current_time(&self) -> f64 {
        self.opened.elapsed().as_secs_f64()
    }

    fn play(&mut self, tone: &ScheduledTone) -> Result<(), AudioError> {
        let samples: Vec<f32> = tone.voice().render().into_iter().map(|s| s as f32).collect();
        self.sink
            .append(rodio::buffer::SamplesBuffer::new(1, tone.sample_rate, samples));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A device whose output is always broken.
    struct FailingDevice {
        attempts: usize,
    }

    impl AudioDevice for FailingDevice {
        fn current_time(&self) -> f64 {
            0.0
        }

        fn play(&mut self, _tone: &ScheduledTone) -> Result<(), AudioError> {
            self.attempts += 1;
            Err(AudioError::Unavailable("no output".into()))
        }
    }

    #[test]
    fn schedules_half_second_window() {
        let opts = PlaybackOptions::default();
        let s = ScheduledTone::new(5, &opts, 2.0).unwrap();
        assert_eq!(s.tone.low, 770.0);
        assert_eq!(s.tone.high, 1336.0);
        assert_eq!(s.start, 2.0);
        assert_eq!(s.stop, 2.5);
        assert_eq!(s.volume, 0.5);
        assert_eq!(s.sample_rate, 10_000);
    }

    #[test]
    fn offline_tones_land_back_to_back() {
        let opts = PlaybackOptions::default();
        let mut dev = OfflineDevice::new(10_000);
        assert!(play_tone(&mut dev, 1, &opts));
        assert!(play_tone(&mut dev, 2, &opts));
        assert_eq!(dev.samples().len(), 10_000);
        assert_eq!(dev.history()[0].stop, dev.history()[1].start);
        assert!((dev.current_time() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clock_only_device_keeps_time_but_no_audio() {
        let opts = PlaybackOptions::default();
        let mut dev = OfflineDevice::clock_only(10_000);
        for digit in [1, 2, 3] {
            assert!(play_tone(&mut dev, digit, &opts));
        }
        assert!(dev.samples().is_empty());
        assert!(dev.history().is_empty());
        assert!((dev.current_time() - 1.5).abs() < 1e-12);
        assert_eq!(dev.to_wav().len(), 44);
    }

    #[test]
    fn failure_is_swallowed() {
        let mut dev = FailingDevice { attempts: 0 };
        assert!(!play_tone(&mut dev, 3, &PlaybackOptions::default()));
        assert_eq!(dev.attempts, 1);
    }

    #[test]
    fn sample_rate_mismatch_is_reported_not_raised() {
        let mut dev = OfflineDevice::new(44_100);
        assert!(!play_tone(&mut dev, 7, &PlaybackOptions::default()));
        assert!(dev.samples().is_empty());
    }

    #[test]
    fn out_of_range_digit_never_reaches_device() {
        let mut dev = FailingDevice { attempts: 0 };
        assert!(!play_tone(&mut dev, 11, &PlaybackOptions::default()));
        assert_eq!(dev.attempts, 0);
    }

    #[test]
    fn invalid_volume_is_rejected() {
        let opts = PlaybackOptions {
            sample_rate: 10_000,
            volume: 2.0,
        };
        let err = ScheduledTone::new(1, &opts, 0.0).unwrap_err();
        assert!(matches!(err, DtmfError::Audio(AudioError::InvalidOptions(_))));
    }

    #[test]
    fn offline_wav_export() {
        let mut dev = OfflineDevice::new(10_000);
        play_tone(&mut dev, 0, &PlaybackOptions::default());
        let wav = dev.to_wav();
        assert_eq!(wav.len(), 44 + 5000 * 2);
    }
}
