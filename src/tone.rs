//! DTMF tone table — digit to (row, column) frequency pair.

use serde::{Deserialize, Serialize};

use crate::error::DtmfError;

/// A keypad digit's frequency pair in Hz.
///
/// `low` is the row tone and `high` the column tone; `low < high` holds for
/// every table entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneDefinition {
    pub low: f64,
    pub high: f64,
}

impl ToneDefinition {
    const fn new(low: f64, high: f64) -> Self {
        ToneDefinition { low, high }
    }
}

/// Standard DTMF keypad assignments, indexed by digit.
pub const TONE_TABLE: [ToneDefinition; 10] = [
    ToneDefinition::new(941.0, 1336.0),
    ToneDefinition::new(697.0, 1209.0),
    ToneDefinition::new(697.0, 1336.0),
    ToneDefinition::new(697.0, 1477.0),
    ToneDefinition::new(770.0, 1209.0),
    ToneDefinition::new(770.0, 1336.0),
    ToneDefinition::new(770.0, 1477.0),
    ToneDefinition::new(852.0, 1209.0),
    ToneDefinition::new(852.0, 1336.0),
    ToneDefinition::new(852.0, 1477.0),
];

/// Look up the frequency pair for a digit value (0–9).
pub fn lookup(digit: u8) -> Result<ToneDefinition, DtmfError> {
    TONE_TABLE
        .get(digit as usize)
        .copied()
        .ok_or(DtmfError::DigitOutOfRange { digit })
}

/// Look up the frequency pair for a digit character ('0'–'9').
pub fn lookup_char(ch: char) -> Option<ToneDefinition> {
    let digit = ch.to_digit(10)?;
    lookup(digit as u8).ok()
}
