//! Phase-accumulating sine oscillator with start/stop scheduling.

use std::f64::consts::PI;

/// A sine oscillator that only sounds between its start and stop times.
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub frequency: f64,
    phase: f64,
    sample_rate: f64,
    start_time: Option<f64>,
    stop_time: Option<f64>,
}

impl Oscillator {
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Oscillator {
            frequency,
            phase: 0.0,
            sample_rate,
            start_time: None,
            stop_time: None,
        }
    }

    /// Begin sounding at `time` seconds.
    pub fn start(&mut self, time: f64) {
        self.start_time = Some(time);
    }

    /// Fall silent at `time` seconds.
    pub fn stop(&mut self, time: f64) {
        self.stop_time = Some(time);
    }

    /// Whether the oscillator sounds at `time`.
    pub fn is_active(&self, time: f64) -> bool {
        match self.start_time {
            Some(start) if time >= start => self.stop_time.is_none_or(|stop| time < stop),
            _ => false,
        }
    }

    /// Phase increment per sample.
    fn phase_inc(&self) -> f64 {
        self.frequency / self.sample_rate
    }

    /// Generate the sample at `time`; silent samples do not advance the phase.
    pub fn next_sample(&mut self, time: f64) -> f64 {
        if !self.is_active(time) {
            return 0.0;
        }
        let sample = (2.0 * PI * self.phase).sin();
        self.phase += self.phase_inc();
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }

    /// Reset oscillator phase.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(frequency: f64, sample_rate: f64) -> Oscillator {
        let mut osc = Oscillator::new(frequency, sample_rate);
        osc.start(0.0);
        osc
    }

    #[test]
    fn sine_zero_at_start() {
        let mut osc = running(941.0, 10_000.0);
        let sample = osc.next_sample(0.0);
        assert!(sample.abs() < 1e-10, "Sine should start near 0, got {sample}");
    }

    #[test]
    fn sine_range() {
        let mut osc = running(1477.0, 44_100.0);
        for i in 0..44_100 {
            let s = osc.next_sample(i as f64 / 44_100.0);
            assert!((-1.0..=1.0).contains(&s), "Sine out of range: {s}");
        }
    }

    #[test]
    fn silent_before_start() {
        let mut osc = Oscillator::new(697.0, 10_000.0);
        assert_eq!(osc.next_sample(0.0), 0.0);
        osc.start(0.25);
        assert!(!osc.is_active(0.2));
        assert!(osc.is_active(0.25));
    }

    #[test]
    fn silent_from_stop_time() {
        let mut osc = running(770.0, 10_000.0);
        osc.stop(0.5);
        assert!(osc.is_active(0.4999));
        assert!(!osc.is_active(0.5));
        assert_eq!(osc.next_sample(0.6), 0.0);
    }

    #[test]
    fn quarter_period_peaks() {
        // 2500 Hz at 10 kHz: four samples per cycle, peak on the second one.
        let mut osc = running(2500.0, 10_000.0);
        osc.next_sample(0.0);
        let peak = osc.next_sample(0.0001);
        assert!((peak - 1.0).abs() < 1e-10, "expected peak, got {peak}");
    }

    #[test]
    fn reset_restarts_phase() {
        let mut osc = running(852.0, 10_000.0);
        for i in 0..17 {
            osc.next_sample(i as f64 / 10_000.0);
        }
        osc.reset();
        assert!(osc.next_sample(0.002).abs() < 1e-10);
    }
}
