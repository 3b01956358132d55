//! Editable descriptor state.
//!
//! An [`Editor`] holds the descriptor being edited together with the value it
//! had before the present flag was last cleared, so that setting the flag
//! again brings the old configuration back. All changes go through
//! [`Editor::apply`], which returns the next state and leaves the previous
//! one untouched.

mod action;
pub use self::action::{EditorAction, TypeBit};


use segdesc_core::{SegdescError, parse_bounded};
use segdesc_x86::{CodeSize, Granularity, SegmentDescriptor};
use serde::{Deserialize, Serialize};

use crate::format_bytes;

/// State of a descriptor editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
    current: SegmentDescriptor,
    saved: SegmentDescriptor,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// The descriptor a new session starts from: a flat 32-bit ring 0 code
    /// segment.
    pub const DEFAULT_DESCRIPTOR: u64 = 0x00cf_9a00_0000_ffff;

    /// Creates a session editing [`DEFAULT_DESCRIPTOR`].
    ///
    /// [`DEFAULT_DESCRIPTOR`]: Self::DEFAULT_DESCRIPTOR
    pub fn new() -> Self {
        Self::with_descriptor(SegmentDescriptor::decode(Self::DEFAULT_DESCRIPTOR))
    }

    /// Creates a session editing `descriptor`.
    pub fn with_descriptor(descriptor: SegmentDescriptor) -> Self {
        Self {
            current: descriptor,
            saved: descriptor,
        }
    }

    /// Returns the descriptor being edited.
    pub fn current(&self) -> &SegmentDescriptor {
        &self.current
    }

    /// Returns the descriptor restored when the present flag is set again.
    pub fn saved(&self) -> &SegmentDescriptor {
        &self.saved
    }

    /// Returns the packed form of the descriptor being edited.
    pub fn raw(&self) -> u64 {
        self.current.encode()
    }

    /// Returns the in-memory bytes of the descriptor being edited.
    pub fn bytes(&self) -> String {
        format_bytes(self.raw())
    }

    /// Computes the state that results from `action`.
    ///
    /// # Errors
    ///
    /// Text input that does not parse, or a value that does not fit its
    /// field, is rejected with the corresponding [`SegdescError`]. `self`
    /// stays valid in that case.
    pub fn apply(self, action: EditorAction<'_>) -> Result<Self, SegdescError> {
        tracing::debug!(?action, "applying editor action");

        let result = self.reduce(action);
        if let Err(err) = &result {
            tracing::warn!(%err, ?action, "editor input rejected");
        }

        result
    }

    /// Applies `action` in place. On error the state is left unchanged.
    pub fn update(&mut self, action: EditorAction<'_>) -> Result<(), SegdescError> {
        *self = self.apply(action)?;
        Ok(())
    }

    fn reduce(mut self, action: EditorAction<'_>) -> Result<Self, SegdescError> {
        match action {
            EditorAction::LoadRaw(value) => {
                return Ok(Self::with_descriptor(SegmentDescriptor::decode(value)));
            }
            EditorAction::SetPresent(present) => {
                if self.current.present == present {
                    return Ok(self);
                }

                if present {
                    self.current = SegmentDescriptor {
                        present: true,
                        ..self.saved
                    };
                }
                else {
                    self.saved = self.current;
                    self.current = SegmentDescriptor::default();
                }
            }
            EditorAction::SetAvailable(available) => {
                self.current.available = available;
            }
            EditorAction::SetBase(text) => {
                self.current.base = parse_bounded(text, u64::from(u32::MAX))? as u32;
            }
            EditorAction::SetLimit(text) => {
                self.current.limit =
                    parse_bounded(text, u64::from(SegmentDescriptor::LIMIT_MASK))? as u32;
            }
            EditorAction::SetGranularity(granularity) => {
                self.current.page_granularity = granularity == Granularity::Page4K;
            }
            EditorAction::ChangeType(target) => {
                self.current.change_type(target);
            }
            EditorAction::SetTypeBit(bit, value) => {
                let mask = 1u8 << bit.index();

                if value {
                    self.current.typ |= mask;
                }
                else {
                    self.current.typ &= !mask;
                }
            }
            EditorAction::SetCodeSize(size) => match size {
                CodeSize::Bits16 => {
                    self.current.use32 = false;
                    self.current.use64 = false;
                }
                CodeSize::Bits32 => {
                    self.current.use32 = true;
                    self.current.use64 = false;
                }
                CodeSize::Bits64 => {
                    self.current.use32 = false;
                    self.current.use64 = true;
                    self.current.clear_all_reserved();
                }
            },
            EditorAction::SetDataBig(big) => {
                self.current.use32 = big;
                self.current.use64 = false;
            }
            EditorAction::SetSystemSubtype(subtype) => {
                self.current.typ = subtype & 0xf;
            }
            EditorAction::SetRing(ring) => {
                if ring > SegmentDescriptor::RING_MASK {
                    return Err(SegdescError::too_large(
                        u64::from(ring),
                        u64::from(SegmentDescriptor::RING_MASK),
                    ));
                }

                self.current.ring = ring;
            }
            EditorAction::ClearReserved => {
                self.current.clear_all_reserved();
            }
        }

        Ok(self)
    }
}
