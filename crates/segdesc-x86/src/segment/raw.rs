use serde::{Deserialize, Serialize};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

bitflags::bitflags! {
    /// The flags nibble of a segment descriptor (bits 52 to 55).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DescriptorFlags: u8 {
        /// Available for use by system software (AVL).
        const AVAILABLE = 0b0001;

        /// 64-bit code segment (L).
        const LONG_MODE = 0b0010;

        /// Default operation size / big (D/B).
        const BIG = 0b0100;

        /// Limit is scaled by 4 KBytes (G).
        const GRANULARITY = 0b1000;
    }
}

/// The in-memory layout of a segment descriptor.
///
/// Multi-byte fields are stored as little-endian byte arrays, so the layout
/// is the same on every host and the structure can be read directly out of a
/// dumped GDT or LDT.
#[repr(C)]
#[derive(Default, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct RawSegmentDescriptor {
    /// Segment limit, bits 0 to 15.
    pub limit_low: [u8; 2],

    /// Base address, bits 0 to 23.
    pub base_low: [u8; 3],

    /// Type (bits 0 to 4), DPL (bits 5 and 6) and present flag (bit 7).
    pub access: u8,

    /// Segment limit bits 16 to 19 in the low nibble, flags in the high
    /// nibble.
    pub limit_high_flags: u8,

    /// Base address, bits 24 to 31.
    pub base_high: u8,
}

impl RawSegmentDescriptor {
    /// Size of a segment descriptor in bytes.
    pub const SIZE: usize = size_of::<Self>();

    /// Returns the 20-bit segment limit.
    pub fn limit(&self) -> u32 {
        let [b0, b1] = self.limit_low;
        u32::from_le_bytes([b0, b1, self.limit_high_flags & 0xf, 0])
    }

    /// Returns the 32-bit base address.
    pub fn base(&self) -> u32 {
        let [b0, b1, b2] = self.base_low;
        u32::from_le_bytes([b0, b1, b2, self.base_high])
    }

    /// Returns the 5-bit type field.
    pub fn typ(&self) -> u8 {
        self.access & 0b1_1111
    }

    /// Returns the descriptor privilege level.
    pub fn descriptor_privilege_level(&self) -> u8 {
        (self.access >> 5) & 0b11
    }

    /// Returns the present flag.
    pub fn present(&self) -> bool {
        (self.access >> 7) & 1 != 0
    }

    /// Returns the flags nibble.
    pub fn flags(&self) -> DescriptorFlags {
        DescriptorFlags::from_bits_truncate(self.limit_high_flags >> 4)
    }
}

impl From<u64> for RawSegmentDescriptor {
    fn from(value: u64) -> Self {
        zerocopy::transmute!(value.to_le_bytes())
    }
}

impl From<RawSegmentDescriptor> for u64 {
    fn from(value: RawSegmentDescriptor) -> Self {
        let bytes: [u8; RawSegmentDescriptor::SIZE] = zerocopy::transmute!(value);
        u64::from_le_bytes(bytes)
    }
}

impl std::fmt::Debug for RawSegmentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RawSegmentDescriptor")
            .field("limit", &segdesc_core::Hex(self.limit()))
            .field("base", &segdesc_core::Hex(self.base()))
            .field("type", &segdesc_core::Hex(self.typ()))
            .field(
                "descriptor_privilege_level",
                &self.descriptor_privilege_level(),
            )
            .field("present", &self.present())
            .field("flags", &self.flags())
            .finish()
    }
}
