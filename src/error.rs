use std::fmt;

#[derive(Debug)]
pub enum DtmfError {
    /// The tone table only covers digits 0–9.
    DigitOutOfRange { digit: u8 },
    Audio(AudioError),
    Config(String),
    Io(std::io::Error),
}

#[derive(Debug)]
pub enum AudioError {
    /// No output device could be opened.
    Unavailable(String),
    SampleRateMismatch { expected: u32, found: u32 },
    InvalidOptions(String),
    Backend(String),
}

impl fmt::Display for DtmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DtmfError::DigitOutOfRange { digit } => {
                write!(f, "Digit {digit} has no DTMF tone (expected 0-9)")
            }
            DtmfError::Audio(e) => write!(f, "Audio error: {e}"),
            DtmfError::Config(msg) => write!(f, "Config error: {msg}"),
            DtmfError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for DtmfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DtmfError::Audio(e) => Some(e),
            DtmfError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable(msg) => write!(f, "Audio output unavailable: {msg}"),
            AudioError::SampleRateMismatch { expected, found } => {
                write!(f, "Device runs at {expected} Hz, tone requested {found} Hz")
            }
            AudioError::InvalidOptions(msg) => write!(f, "Invalid playback options: {msg}"),
            AudioError::Backend(msg) => write!(f, "Audio backend failure: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {}

impl From<AudioError> for DtmfError {
    fn from(e: AudioError) -> Self {
        DtmfError::Audio(e)
    }
}

impl From<std::io::Error> for DtmfError {
    fn from(e: std::io::Error) -> Self {
        DtmfError::Io(e)
    }
}

impl From<serde_json::Error> for DtmfError {
    fn from(e: serde_json::Error) -> Self {
        DtmfError::Config(e.to_string())
    }
}
