//! Voice — one DTMF tone: two oscillators mixed through a gain stage.

use crate::tone::ToneDefinition;

use super::gain::GainStage;
use super::oscillator::Oscillator;

/// A single DTMF voice: row and column oscillators into one gain stage.
#[derive(Debug, Clone)]
pub struct DtmfVoice {
    pub low: Oscillator,
    pub high: Oscillator,
    pub gain: GainStage,
    sample_rate: f64,
    /// Time (seconds, voice-local) at which both oscillators stop.
    end_time: f64,
}

impl DtmfVoice {
    /// Build a voice sounding from 0 to `duration` seconds at `volume`.
    ///
    /// Gain drops to zero and both oscillators stop at the same mark.
    pub fn new(tone: ToneDefinition, volume: f64, duration: f64, sample_rate: f64) -> Self {
        let mut low = Oscillator::new(tone.low, sample_rate);
        let mut high = Oscillator::new(tone.high, sample_rate);
        let mut gain = GainStage::new(volume);

        gain.set_value_at_time(0.0, duration);
        low.start(0.0);
        high.start(0.0);
        low.stop(duration);
        high.stop(duration);

        DtmfVoice {
            low,
            high,
            gain,
            sample_rate,
            end_time: duration,
        }
    }

    /// Number of samples covering the voice's lifetime.
    pub fn len_samples(&self) -> usize {
        (self.end_time * self.sample_rate).round() as usize
    }

    /// Generate the sample at voice-local `time`.
    pub fn next_sample(&mut self, time: f64) -> f64 {
        let inputs = [self.low.next_sample(time), self.high.next_sample(time)];
        self.gain.process(&inputs, time)
    }

    /// Render the whole voice to mono samples.
    pub fn render(&mut self) -> Vec<f64> {
        (0..self.len_samples())
            .map(|i| self.next_sample(i as f64 / self.sample_rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone;

    #[test]
    fn half_second_length() {
        let mut voice = DtmfVoice::new(tone::lookup(5).unwrap(), 0.5, 0.5, 10_000.0);
        assert_eq!(voice.len_samples(), 5000);
        assert_eq!(voice.render().len(), 5000);
    }

    #[test]
    fn peak_bounded_by_volume() {
        let mut voice = DtmfVoice::new(tone::lookup(0).unwrap(), 0.5, 0.5, 44_100.0);
        let samples = voice.render();
        let peak = samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        assert!(peak <= 1.0 + 1e-9, "two sines at 0.5 gain exceed 1.0: {peak}");
        assert!(peak > 0.5, "tone should be audible, peak {peak}");
    }

    #[test]
    fn matches_sum_of_sines() {
        let sr = 8000.0;
        let t = tone::lookup(3).unwrap();
        let mut voice = DtmfVoice::new(t, 0.25, 0.5, sr);
        let samples = voice.render();
        for (i, s) in samples.iter().enumerate().take(200) {
            let time = i as f64 / sr;
            let expected = 0.25
                * ((2.0 * std::f64::consts::PI * t.low * time).sin()
                    + (2.0 * std::f64::consts::PI * t.high * time).sin());
            assert!((s - expected).abs() < 1e-6, "sample {i}: {s} vs {expected}");
        }
    }

    #[test]
    fn silent_after_end() {
        let mut voice = DtmfVoice::new(tone::lookup(9).unwrap(), 1.0, 0.5, 10_000.0);
        assert_eq!(voice.next_sample(0.5), 0.0);
        assert_eq!(voice.next_sample(0.75), 0.0);
    }

    #[test]
    fn zero_volume_is_silent() {
        let mut voice = DtmfVoice::new(tone::lookup(1).unwrap(), 0.0, 0.5, 10_000.0);
        assert!(voice.render().iter().all(|&s| s == 0.0));
    }
}
