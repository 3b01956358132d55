use crate::SegdescError;

/// The base a number is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// Base 2, selected by the `0b` prefix.
    Binary,

    /// Base 8, selected by the `0o` prefix.
    Octal,

    /// Base 10, selected by the `0d` prefix or by the absence of any prefix.
    Decimal,

    /// Base 16, selected by the `0x` prefix or the `h` suffix.
    Hexadecimal,
}

impl Radix {
    /// Returns the numeric base.
    pub fn base(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Splits the radix marker off `text`.
    ///
    /// `text` is expected to be lowercase already.
    fn split(text: &str) -> (Self, &str) {
        if let Some(digits) = text.strip_prefix("0b") {
            (Self::Binary, digits)
        }
        else if let Some(digits) = text.strip_prefix("0o") {
            (Self::Octal, digits)
        }
        else if let Some(digits) = text.strip_prefix("0d") {
            (Self::Decimal, digits)
        }
        else if let Some(digits) = text.strip_prefix("0x") {
            (Self::Hexadecimal, digits)
        }
        else if let Some(digits) = text.strip_suffix('h') {
            (Self::Hexadecimal, digits)
        }
        else {
            (Self::Decimal, text)
        }
    }
}

/// Parses an unsigned number.
///
/// The base is taken from a case-insensitive marker:
///
/// - no marker: base 10
/// - `0b`: base 2
/// - `0o`: base 8
/// - `0d`: base 10
/// - `0x`: base 16
/// - `h` suffix: base 16
///
/// Underscores are ignored so that long values can be grouped, and
/// surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`SegdescError::Malformed`] if no digits remain after the marker
/// is removed or if any character is not a digit of the selected base, and
/// [`SegdescError::Overflow`] if the value does not fit into 64 bits.
///
/// # Examples
///
/// ```
/// # use segdesc_core::{SegdescError, parse_number};
/// assert_eq!(parse_number("0x00CF_9A00"), Ok(0x00cf_9a00));
/// assert_eq!(parse_number("FFh"), Ok(0xff));
/// assert_eq!(parse_number("0b101"), Ok(5));
/// assert_eq!(parse_number("42"), Ok(42));
/// assert_eq!(parse_number("0o9"), Err(SegdescError::Malformed));
/// ```
pub fn parse_number(text: &str) -> Result<u64, SegdescError> {
    let text = text.trim().to_ascii_lowercase().replace('_', "");
    let (radix, digits) = Radix::split(&text);

    if digits.is_empty() {
        return Err(SegdescError::Malformed);
    }

    let base = radix.base();
    let digits = digits
        .chars()
        .map(|c| c.to_digit(base).ok_or(SegdescError::Malformed))
        .collect::<Result<Vec<_>, _>>()?;

    digits.into_iter().try_fold(0u64, |acc, digit| {
        acc.checked_mul(u64::from(base))
            .and_then(|acc| acc.checked_add(u64::from(digit)))
            .ok_or(SegdescError::Overflow)
    })
}

/// Parses an unsigned number that must not exceed `max`.
///
/// # Errors
///
/// Returns the errors of [`parse_number`], and [`SegdescError::TooLarge`]
/// if the value is larger than `max`.
pub fn parse_bounded(text: &str, max: u64) -> Result<u64, SegdescError> {
    let value = match parse_number(text) {
        Ok(value) => value,
        Err(SegdescError::Overflow) => return Err(SegdescError::too_large(u64::MAX, max)),
        Err(err) => return Err(err),
    };

    if value > max {
        tracing::trace!(value, max, "number out of range");
        return Err(SegdescError::too_large(value, max));
    }

    Ok(value)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod parse_tests;
