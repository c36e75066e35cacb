//! Playback sequencer — one digit in flight at a time.
//!
//! For each digit: trigger the tone, draw (or clear) the graph, then wait
//! one tone length before moving on. The wait is what keeps tones from
//! overlapping and graphs from being replaced mid-render.

use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::{AudioDevice, play_tone};
use crate::graph::{Surface, draw_graph};
use crate::options::{PlaybackOptions, SessionConfig, TONE_DURATION};
use crate::timer::{Timer, Wait};
use crate::tone;

/// Pause after each tone; matches the tone length.
pub fn tone_step() -> Duration {
    Duration::from_secs_f64(TONE_DURATION)
}

/// What happened during one run over a digit sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    /// Digits whose tone was triggered, in order.
    pub played: Vec<u8>,
    /// Digits without a tone.
    pub skipped: Vec<u8>,
    /// The sequence was cancelled before it finished.
    pub cancelled: bool,
}

pub struct Sequencer<D, S, T> {
    device: D,
    surface: S,
    timer: T,
    options: PlaybackOptions,
    show_graph: bool,
}

impl<D: AudioDevice, S: Surface, T: Timer> Sequencer<D, S, T> {
    pub fn new(device: D, surface: S, timer: T) -> Self {
        let config = SessionConfig::default();
        Sequencer {
            device,
            surface,
            timer,
            options: config.playback,
            show_graph: config.show_graph,
        }
    }

    pub fn with_config(mut self, config: &SessionConfig) -> Self {
        self.options = config.playback;
        self.show_graph = config.show_graph;
        self
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn into_parts(self) -> (D, S, T) {
        (self.device, self.surface, self.timer)
    }

    /// Play `digits` in order, running to completion unless cancelled.
    ///
    /// A cancellation that is already pending stops the run before the next
    /// tone is triggered.
    pub async fn run(&mut self, digits: &[u8]) -> SequenceReport {
        let mut report = SequenceReport::default();
        for &digit in digits {
            if self.timer.is_cancelled() {
                debug!(digit, "sequence cancelled before tone");
                report.cancelled = true;
                break;
            }

            if let Err(e) = tone::lookup(digit) {
                warn!(digit, error = %e, "skipping digit");
                report.skipped.push(digit);
                continue;
            }

            play_tone(&mut self.device, digit, &self.options);
            self.update_graph(digit);
            report.played.push(digit);

            if self.timer.sleep(tone_step()).await == Wait::Cancelled {
                debug!(digit, "sequence cancelled");
                report.cancelled = true;
                break;
            }
        }
        report
    }

    fn update_graph(&mut self, digit: u8) {
        if self.show_graph {
            if let Err(e) = draw_graph(&mut self.surface, digit) {
                warn!(digit, error = %e, "graph not drawn");
            }
        } else if self.surface.displayed().is_some() {
            if let Err(e) = self.surface.clear() {
                warn!(error = %e, "graph not cleared");
            }
        }
    }
}
