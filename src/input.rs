//! Free-text input → digit sequence.

use serde::Serialize;

/// Ordered digits extracted from a line of user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigitSequence {
    digits: Vec<u8>,
}

impl DigitSequence {
    /// Keep only ASCII decimal digits, in order; everything else is dropped.
    pub fn parse(input: &str) -> Self {
        let digits = input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .map(|c| c as u8 - b'0')
            .collect();
        DigitSequence { digits }
    }

    /// Build a sequence from raw digit values without filtering.
    ///
    /// Values above 9 are kept; the sequencer reports and skips them.
    pub fn from_values(values: impl IntoIterator<Item = u8>) -> Self {
        DigitSequence {
            digits: values.into_iter().collect(),
        }
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Comma-joined form used in log output, e.g. `5,5,5`.
    pub fn joined(&self) -> String {
        self.digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_digits_in_order() {
        let seq = DigitSequence::parse("5551234");
        assert_eq!(seq.digits(), &[5, 5, 5, 1, 2, 3, 4]);
        assert_eq!(seq.len(), 7);
    }

    #[test]
    fn discards_non_digits() {
        assert_eq!(DigitSequence::parse("5a5#b5"), DigitSequence::parse("555"));
        assert_eq!(DigitSequence::parse("*0#").digits(), &[0]);
    }

    #[test]
    fn empty_and_digitless_input() {
        assert!(DigitSequence::parse("").is_empty());
        assert!(DigitSequence::parse("abc *#").is_empty());
    }

    #[test]
    fn non_ascii_digits_are_ignored() {
        // Arabic-Indic digits are numeric but not part of the keypad.
        assert_eq!(DigitSequence::parse("1\u{0663}2").digits(), &[1, 2]);
    }

    #[test]
    fn joined_for_logging() {
        assert_eq!(DigitSequence::parse("1-2-3").joined(), "1,2,3");
        assert_eq!(DigitSequence::default().joined(), "");
    }
}
