use segdesc_x86::{CodeSize, Granularity, SegmentType};

/// One of the attribute bits shared by code and data segments (bits 0 to 2
/// of the type field). Their meaning depends on the segment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeBit {
    /// Bit 0: accessed.
    Accessed,

    /// Bit 1: readable for code segments, writable for data segments.
    ReadWrite,

    /// Bit 2: conforming for code segments, expand-down for data segments.
    ConformingOrExpandDown,
}

impl TypeBit {
    /// Returns the bit position within the type field.
    pub fn index(self) -> u8 {
        match self {
            Self::Accessed => 0,
            Self::ReadWrite => 1,
            Self::ConformingOrExpandDown => 2,
        }
    }
}

/// A single edit of the session state.
///
/// Text-carrying actions hold the raw user input; it is parsed with
/// [`parse_bounded`](segdesc_core::parse_bounded) when the action is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction<'a> {
    /// Replaces the session with the decoded value.
    LoadRaw(u64),

    /// Sets or clears the present flag.
    ///
    /// Clearing it stashes the current descriptor and replaces it with an
    /// empty one; setting it brings the stashed descriptor back.
    SetPresent(bool),

    /// Sets the software-available bit.
    SetAvailable(bool),

    /// Sets the base address from text (at most 32 bits).
    SetBase(&'a str),

    /// Sets the raw limit from text (at most 20 bits).
    SetLimit(&'a str),

    /// Sets the G flag.
    SetGranularity(Granularity),

    /// Switches the descriptor to another segment class.
    ChangeType(SegmentType),

    /// Sets or clears one of the low type bits.
    SetTypeBit(TypeBit, bool),

    /// Selects the size of a code segment. Selecting 64 bits also clears the
    /// fields that are reserved in 64-bit mode.
    SetCodeSize(CodeSize),

    /// Selects a 32-bit (B flag set) or 16-bit data segment.
    SetDataBig(bool),

    /// Sets the subtype of a system descriptor.
    SetSystemSubtype(u8),

    /// Sets the descriptor privilege level (0 to 3).
    SetRing(u8),

    /// Clears every reserved field.
    ClearReserved,
}
