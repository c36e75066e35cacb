//! Interactive session — prompt, parse, play, repeat.

use std::future::Future;

use tracing::{debug, info};

use crate::audio::AudioDevice;
use crate::graph::Surface;
use crate::input::DigitSequence;
use crate::sequencer::{SequenceReport, Sequencer};
use crate::timer::Timer;

pub const PROMPT: &str = "Enter tones";

/// Where lines of user input come from.
pub trait InputSource {
    /// Read one response to `prompt`. `None` means the input was closed or
    /// cancelled; an empty string is a valid (empty) response.
    fn read_line(&mut self, prompt: &str) -> impl Future<Output = Option<String>>;
}

/// Line input from an async reader, abandoned as soon as the token is
/// cancelled. The prompt goes to stdout.
#[cfg(any(feature = "cli", test))]
pub struct LinesInput<R> {
    lines: tokio::io::Lines<R>,
    cancel: tokio_util::sync::CancellationToken,
}

#[cfg(any(feature = "cli", test))]
impl<R: tokio::io::AsyncBufRead + Unpin> LinesInput<R> {
    pub fn new(reader: R, cancel: tokio_util::sync::CancellationToken) -> Self {
        use tokio::io::AsyncBufReadExt;
        LinesInput {
            lines: reader.lines(),
            cancel,
        }
    }
}

#[cfg(any(feature = "cli", test))]
impl<R: tokio::io::AsyncBufRead + Unpin> InputSource for LinesInput<R> {
    async fn read_line(&mut self, prompt: &str) -> Option<String> {
        use std::io::Write;

        if self.cancel.is_cancelled() {
            return None;
        }
        print!("{prompt}: ");
        std::io::stdout().flush().ok()?;
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("prompt cancelled");
                None
            }
            line = self.lines.next_line() => match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    None
                }
            },
        }
    }
}

/// Totals over a whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Prompts answered with at least one digit.
    pub cycles: usize,
    pub tones: usize,
    pub cancelled: bool,
}

pub struct Session<I, D, S, T> {
    input: I,
    sequencer: Sequencer<D, S, T>,
}

impl<I: InputSource, D: AudioDevice, S: Surface, T: Timer> Session<I, D, S, T> {
    pub fn new(input: I, sequencer: Sequencer<D, S, T>) -> Self {
        Session { input, sequencer }
    }

    pub fn sequencer(&self) -> &Sequencer<D, S, T> {
        &self.sequencer
    }

    pub fn into_sequencer(self) -> Sequencer<D, S, T> {
        self.sequencer
    }

    /// Play one line of input. Lines without digits play nothing.
    pub async fn play_line(&mut self, line: &str) -> SequenceReport {
        let digits = DigitSequence::parse(line);
        if digits.is_empty() {
            debug!("no digits in input");
            return SequenceReport::default();
        }
        if digits.len() > 1 {
            info!(tones = %digits.joined(), "tones");
        }
        self.sequencer.run(digits.digits()).await
    }

    /// Prompt until the input closes or a sequence is cancelled.
    pub async fn run(&mut self) -> SessionSummary {
        let mut summary = SessionSummary::default();
        while let Some(line) = self.input.read_line(PROMPT).await {
            let report = self.play_line(&line).await;
            if !report.played.is_empty() {
                summary.cycles += 1;
                summary.tones += report.played.len();
            }
            if report.cancelled {
                summary.cancelled = true;
                break;
            }
        }
        debug!(?summary, "session ended");
        summary
    }
}
