//! Decoder, encoder and interpreter for x86 segment descriptors.
//!
//! A segment descriptor is one 8-byte entry of the Global or Local
//! Descriptor Table. This crate converts between the packed form and a
//! structured [`SegmentDescriptor`], classifies it, computes the addresses
//! it covers and reports configurations that are reserved, invalid or tied
//! to a particular processor generation.
//!
//! # Crates
//!
//! - [`segdesc_core`] (re-exported at the root): errors, numeric text input
//!   and hexadecimal formatting.
//! - [`x86`]: the descriptor model itself. Enabled by the `x86` feature.
//! - [`utils`]: the editing session, presets and human-readable summaries.
//!   Enabled by the `utils` feature.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "x86")]
//! # {
//! use segdesc::x86::{CodeSize, SegmentDescriptor, SegmentType};
//!
//! let descriptor = SegmentDescriptor::decode(0x00cf_9a00_0000_ffff);
//!
//! assert_eq!(descriptor.segment_type(), SegmentType::Code);
//! assert_eq!(descriptor.code_size(), Some(CodeSize::Bits32));
//! assert_eq!(descriptor.bounds().linear_max, 0xffff_ffff);
//! assert_eq!(descriptor.encode(), 0x00cf_9a00_0000_ffff);
//! # }
//! ```
//!
//! [`SegmentDescriptor`]: segdesc_x86::SegmentDescriptor

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use segdesc_core::*;

/// The x86 descriptor model.
#[cfg(feature = "x86")]
#[cfg_attr(docsrs, doc(cfg(feature = "x86")))]
pub use segdesc_x86 as x86;

/// Editing session, presets and summaries.
#[cfg(feature = "utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "utils")))]
pub use segdesc_utils as utils;

/// Decodes a packed descriptor, logging the result.
///
/// This is a convenience over [`x86::SegmentDescriptor::decode`] for
/// callers that only hold the raw value.
#[cfg(feature = "x86")]
pub fn decode(value: u64) -> x86::SegmentDescriptor {
    let descriptor = x86::SegmentDescriptor::decode(value);
    tracing::trace!(value = %Hex(value), %descriptor, "decoded descriptor");
    descriptor
}

/// Parses a descriptor given as text in any supported radix.
///
/// # Errors
///
/// Returns [`SegdescError::Malformed`] or [`SegdescError::Overflow`] if the
/// text is not a number that fits in 64 bits.
#[cfg(feature = "x86")]
pub fn parse_descriptor(text: &str) -> Result<x86::SegmentDescriptor, SegdescError> {
    parse_number(text).map(decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "x86")]
    fn parse_descriptor_accepts_any_radix() -> Result<(), SegdescError> {
        let from_hex = parse_descriptor("0x00cf_9a00_0000_ffff")?;
        let from_suffix = parse_descriptor("00cf9a000000ffffh")?;

        assert_eq!(from_hex, from_suffix);
        assert_eq!(from_hex.segment_type(), x86::SegmentType::Code);

        Ok(())
    }

    #[test]
    #[cfg(feature = "x86")]
    fn parse_descriptor_rejects_garbage() {
        assert_eq!(parse_descriptor("gdt"), Err(SegdescError::Malformed));
    }
}
