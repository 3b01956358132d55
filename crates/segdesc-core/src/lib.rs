//! Core segdesc functionality.
//!
//! This crate holds the pieces shared by every other segdesc crate: the
//! error type, the numeric text contract used when editing descriptor fields,
//! and fixed-width hexadecimal formatting.

mod error;
mod hex;
mod parse;

pub use self::{
    error::SegdescError,
    hex::{Hex, Hex32Grouped},
    parse::{Radix, parse_bounded, parse_number},
};
