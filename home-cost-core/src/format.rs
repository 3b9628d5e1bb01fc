//! Grouped-thousands rendering and parsing of whole amounts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest amount accepted from text input (fifteen nines).
///
/// Keeps every intermediate of the fee calculation far inside `u64`.
pub const MAX_AMOUNT: u64 = 999_999_999_999_999;

/// Error returned when text is not a non-negative whole amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("unexpected character '{0}'")]
    InvalidCharacter(char),

    #[error("amount is larger than 999,999,999,999,999")]
    TooLarge,
}

/// Formats and parses amounts with a single grouping separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub grouping_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            grouping_separator: ',',
        }
    }
}

impl NumberFormat {
    pub fn new(grouping_separator: char) -> Self {
        Self { grouping_separator }
    }

    /// Renders `value` with a separator between every group of three digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use home_cost_core::NumberFormat;
    ///
    /// let format = NumberFormat::default();
    /// assert_eq!(format.format(0), "0");
    /// assert_eq!(format.format(999), "999");
    /// assert_eq!(format.format(1_000), "1,000");
    /// assert_eq!(format.format(183_250), "183,250");
    /// assert_eq!(format.format(1_234_567), "1,234,567");
    /// ```
    pub fn format(
        &self,
        value: u64,
    ) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(
            digits.len() + digits.len() / 3 * self.grouping_separator.len_utf8(),
        );
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(digit);
        }
        out
    }

    /// Removes every grouping separator from `text`.
    pub fn strip(
        &self,
        text: &str,
    ) -> String {
        text.replace(self.grouping_separator, "")
    }

    /// Parses field text, treating empty or whitespace-only text as zero.
    ///
    /// # Errors
    ///
    /// See [`NumberFormat::parse_strict`].
    pub fn parse(
        &self,
        text: &str,
    ) -> Result<u64, ParseAmountError> {
        match self.parse_strict(text) {
            Err(ParseAmountError::Empty) => Ok(0),
            other => other,
        }
    }

    /// Parses field text that must contain at least one digit.
    ///
    /// Separators are stripped and surrounding whitespace trimmed first.
    ///
    /// # Errors
    ///
    /// - [`ParseAmountError::Empty`] if nothing is left after stripping
    /// - [`ParseAmountError::InvalidCharacter`] for anything but ASCII digits,
    ///   including signs and decimal points
    /// - [`ParseAmountError::TooLarge`] above [`MAX_AMOUNT`]
    pub fn parse_strict(
        &self,
        text: &str,
    ) -> Result<u64, ParseAmountError> {
        let stripped = self.strip(text);
        let digits = stripped.trim();
        if digits.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        if let Some(invalid) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ParseAmountError::InvalidCharacter(invalid));
        }
        // Only digits remain, so the parse can fail on overflow alone.
        let value: u64 = digits.parse().map_err(|_| ParseAmountError::TooLarge)?;
        if value > MAX_AMOUNT {
            return Err(ParseAmountError::TooLarge);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn format_groups_thousands() {
        let format = NumberFormat::default();

        assert_eq!(format.format(12), "12");
        assert_eq!(format.format(12_345), "12,345");
        assert_eq!(format.format(123_456), "123,456");
        assert_eq!(format.format(MAX_AMOUNT), "999,999,999,999,999");
    }

    #[test]
    fn format_uses_configured_separator() {
        let format = NumberFormat::new('\u{a0}');

        assert_eq!(format.format(1_500_000), "1\u{a0}500\u{a0}000");
    }

    #[test]
    fn strip_then_format_is_idempotent() {
        let format = NumberFormat::default();
        for text in ["0", "7", "1,000", "12,345,678", "999,999,999,999,999"] {
            let value = format.parse(&format.strip(text)).unwrap();

            assert_eq!(format.format(value), text);
        }
    }

    #[test]
    fn parse_accepts_grouped_and_plain_digits() {
        let format = NumberFormat::default();

        assert_eq!(format.parse("1,234,567"), Ok(1_234_567));
        assert_eq!(format.parse("1234567"), Ok(1_234_567));
        assert_eq!(format.parse(" 42 "), Ok(42));
    }

    #[test]
    fn parse_ignores_misplaced_separators() {
        assert_eq!(NumberFormat::default().parse("12,34,5"), Ok(12_345));
    }

    #[test]
    fn parse_empty_is_zero() {
        let format = NumberFormat::default();

        assert_eq!(format.parse(""), Ok(0));
        assert_eq!(format.parse("   "), Ok(0));
        assert_eq!(format.parse(",,"), Ok(0));
    }

    #[test]
    fn parse_strict_rejects_empty() {
        assert_eq!(
            NumberFormat::default().parse_strict(""),
            Err(ParseAmountError::Empty)
        );
    }

    #[test]
    fn parse_rejects_non_digits() {
        let format = NumberFormat::default();

        assert_eq!(format.parse("12a"), Err(ParseAmountError::InvalidCharacter('a')));
        assert_eq!(format.parse("-1"), Err(ParseAmountError::InvalidCharacter('-')));
        assert_eq!(format.parse("1.5"), Err(ParseAmountError::InvalidCharacter('.')));
    }

    #[test]
    fn parse_rejects_other_separator() {
        let format = NumberFormat::new(' ');

        assert_eq!(
            format.parse("1,000"),
            Err(ParseAmountError::InvalidCharacter(','))
        );
        assert_eq!(format.parse("1 000"), Ok(1_000));
    }

    #[test]
    fn parse_rejects_amounts_above_maximum() {
        let format = NumberFormat::default();

        assert_eq!(format.parse("1,000,000,000,000,000"), Err(ParseAmountError::TooLarge));
        assert_eq!(format.parse("99999999999999999999999"), Err(ParseAmountError::TooLarge));
    }
}
