//! Utilities for inspecting and editing segment descriptors.

#[cfg(feature = "editor")]
pub mod editor;

#[cfg(feature = "presets")]
pub mod presets;

mod bytes;
pub use self::bytes::{format_bytes, parse_bytes};

mod summary;
pub use self::summary::{BoundsSummary, PageCount};
