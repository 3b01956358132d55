use segdesc_core::{SegdescError, parse_bounded};

/// Number of bytes in a packed descriptor.
const DESCRIPTOR_BYTES: usize = 8;

/// Formats a packed descriptor as its 8 in-memory bytes.
///
/// Bytes are written in memory order (little endian), as two lowercase hex
/// digits each, separated by single spaces.
///
/// ```
/// # use segdesc_utils::format_bytes;
/// assert_eq!(format_bytes(0x00cf9a000000ffff), "ff ff 00 00 00 9a cf 00");
/// ```
pub fn format_bytes(value: u64) -> String {
    value
        .to_le_bytes()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses the output of [`format_bytes`] back into a packed descriptor.
///
/// Bytes are separated by whitespace and written in hex, optionally with a
/// `0x` prefix.
///
/// # Errors
///
/// Returns [`SegdescError::Malformed`] or [`SegdescError::TooLarge`] for a
/// token that is not a hex byte, and [`SegdescError::InvalidLength`] unless
/// there are exactly 8 bytes.
pub fn parse_bytes(text: &str) -> Result<u64, SegdescError> {
    let bytes = text
        .split_whitespace()
        .map(parse_byte)
        .collect::<Result<Vec<_>, _>>()?;

    let bytes: [u8; DESCRIPTOR_BYTES] = bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| SegdescError::invalid_length(DESCRIPTOR_BYTES, bytes.len()))?;

    Ok(u64::from_le_bytes(bytes))
}

fn parse_byte(token: &str) -> Result<u8, SegdescError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    let value = parse_bounded(&format!("0x{digits}"), u64::from(u8::MAX))?;
    Ok(value as u8)
}
