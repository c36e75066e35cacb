//! Playback options and session configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DtmfError;

/// Length of one tone, and of the pause the sequencer takes after it.
pub const TONE_DURATION: f64 = 0.5;

pub const DEFAULT_SAMPLE_RATE: u32 = 10_000;
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Sample rates an audio context accepts, in Hz.
pub const MIN_SAMPLE_RATE: u32 = 3_000;
pub const MAX_SAMPLE_RATE: u32 = 768_000;

/// Per-session audio settings, passed unchanged to every tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackOptions {
    pub sample_rate: u32,
    /// Output gain [0, 1].
    pub volume: f64,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        PlaybackOptions {
            sample_rate: DEFAULT_SAMPLE_RATE,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PlaybackOptions {
    pub fn validate(&self) -> Result<(), DtmfError> {
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(DtmfError::Config(format!(
                "sampleRate must be within {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE}, got {}",
                self.sample_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(DtmfError::Config(format!(
                "volume must be within 0..=1, got {}",
                self.volume
            )));
        }
        Ok(())
    }
}

/// Everything an interactive session needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub playback: PlaybackOptions,
    /// Draw each digit's waveform; when off, any displayed graph is cleared.
    pub show_graph: bool,
    /// Where the SVG surface mirrors the displayed graph, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            playback: PlaybackOptions::default(),
            show_graph: true,
            graph_dir: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DtmfError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.playback.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, DtmfError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
