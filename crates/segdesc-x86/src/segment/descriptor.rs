use segdesc_core::{Hex, SegdescError};
use serde::{Deserialize, Serialize};
use zerocopy::FromBytes;

use super::{
    CodeAttributes, CodeSize, DataAttributes, DescriptorFlags, DescriptorType, Granularity,
    OperationSize, RawSegmentDescriptor, SegmentAttributes, SegmentType, SystemAttributes,
};

/// A segment descriptor is a data structure in a GDT or LDT that provides the
/// processor with the size and location of a segment, as well as access control
/// and status information.
///
/// The structure holds every field of the 8-byte descriptor in unpacked form.
/// Fields are public and may hold values wider than their architectural width;
/// [`encode`] masks every field to its width, so such values are truncated
/// rather than rejected.
///
/// [`encode`]: Self::encode
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDescriptor {
    /// Specifies the size of the segment, in units selected by the
    /// granularity flag (20 bits).
    ///
    /// For expand-up segments, the offset in a logical address can range from
    /// 0 to the segment limit. For expand-down segments, the segment limit has
    /// the reverse function; the offset can range from the segment limit plus
    /// 1 to FFFFFFFFH or FFFFH, depending on the setting of the B flag.
    pub limit: u32,

    /// Defines the location of byte 0 of the segment within the 4-GByte linear
    /// address space.
    pub base: u32,

    /// Indicates the segment or gate type and specifies the kinds of access
    /// that can be made to the segment (5 bits, including the S flag).
    pub typ: u8,

    /// Specifies the privilege level of the segment (2 bits). The privilege
    /// level can range from 0 to 3, with 0 being the most privileged level.
    pub ring: u8,

    /// Indicates whether the segment is present in memory.
    pub present: bool,

    /// Available for use by system software.
    pub available: bool,

    /// The D/B flag.
    pub use32: bool,

    /// The L flag. Only meaningful for code segments.
    pub use64: bool,

    /// The G flag.
    pub page_granularity: bool,
}

impl SegmentDescriptor {
    /// Largest value of the limit field.
    pub const LIMIT_MASK: u32 = 0xf_ffff;

    /// Largest value of the type field.
    pub const TYPE_MASK: u8 = 0b1_1111;

    /// Largest value of the ring field.
    pub const RING_MASK: u8 = 0b11;

    /// Type of a freshly selected system descriptor (16-bit TSS, available).
    pub const SYSTEM_TYPE: u8 = 0b0_0001;

    /// Type of a freshly selected code descriptor (execute-only,
    /// non-conforming, not accessed).
    pub const CODE_TYPE: u8 = 0b1_1000;

    /// Type of a freshly selected data descriptor (read-only, expand-up, not
    /// accessed).
    pub const DATA_TYPE: u8 = 0b1_0000;

    /// Unpacks a descriptor from its 64-bit representation.
    ///
    /// Every 64-bit value is a valid input.
    pub fn decode(value: u64) -> Self {
        let flags = DescriptorFlags::from_bits_truncate(((value >> 52) & 0xf) as u8);

        Self {
            limit: ((value & 0xffff) | (((value >> 48) & 0xf) << 16)) as u32,
            base: (((value >> 16) & 0xff_ffff) | (((value >> 56) & 0xff) << 24)) as u32,
            typ: ((value >> 40) & 0b1_1111) as u8,
            ring: ((value >> 45) & 0b11) as u8,
            present: (value >> 47) & 1 != 0,
            available: flags.contains(DescriptorFlags::AVAILABLE),
            use64: flags.contains(DescriptorFlags::LONG_MODE),
            use32: flags.contains(DescriptorFlags::BIG),
            page_granularity: flags.contains(DescriptorFlags::GRANULARITY),
        }
    }

    /// Packs the descriptor into its 64-bit representation.
    ///
    /// Each field is masked to its architectural width first.
    pub fn encode(&self) -> u64 {
        let limit = u64::from(self.limit & Self::LIMIT_MASK);
        let base = u64::from(self.base);

        let mut value = 0;
        value |= limit & 0xffff;
        value |= (base & 0xff_ffff) << 16;
        value |= u64::from(self.typ & Self::TYPE_MASK) << 40;
        value |= u64::from(self.ring & Self::RING_MASK) << 45;
        value |= u64::from(self.present) << 47;
        value |= ((limit >> 16) & 0xf) << 48;
        value |= u64::from(self.flags().bits()) << 52;
        value |= ((base >> 24) & 0xff) << 56;
        value
    }

    /// Reads a descriptor from its 8-byte in-memory form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SegdescError> {
        let raw = RawSegmentDescriptor::read_from_bytes(bytes)
            .map_err(|_| SegdescError::invalid_length(RawSegmentDescriptor::SIZE, bytes.len()))?;

        Ok(Self::from(raw))
    }

    /// Returns the 8-byte in-memory form of the descriptor.
    pub fn to_bytes(&self) -> [u8; RawSegmentDescriptor::SIZE] {
        self.encode().to_le_bytes()
    }

    /// Returns the flags nibble (AVL, L, D/B, G).
    pub fn flags(&self) -> DescriptorFlags {
        let mut flags = DescriptorFlags::empty();
        flags.set(DescriptorFlags::AVAILABLE, self.available);
        flags.set(DescriptorFlags::LONG_MODE, self.use64);
        flags.set(DescriptorFlags::BIG, self.use32);
        flags.set(DescriptorFlags::GRANULARITY, self.page_granularity);
        flags
    }

    /// Returns the S flag of the type field.
    pub fn descriptor_type(&self) -> DescriptorType {
        if (self.typ >> 4) & 1 == 0 {
            DescriptorType::System
        }
        else {
            DescriptorType::CodeOrData
        }
    }

    /// Returns the D/B flag.
    pub fn operation_size(&self) -> OperationSize {
        if self.use32 {
            OperationSize::Big
        }
        else {
            OperationSize::Default
        }
    }

    /// Returns the G flag.
    pub fn granularity(&self) -> Granularity {
        if self.page_granularity {
            Granularity::Page4K
        }
        else {
            Granularity::Byte
        }
    }

    /// Classifies the descriptor.
    ///
    /// A descriptor that is not present is reported as such, regardless of
    /// its type bits.
    pub fn segment_type(&self) -> SegmentType {
        if !self.present {
            SegmentType::NotPresent
        }
        else if self.descriptor_type() == DescriptorType::System {
            SegmentType::System
        }
        else if (self.typ >> 3) & 1 != 0 {
            SegmentType::Code
        }
        else {
            SegmentType::Data
        }
    }

    /// Decodes the type-specific attributes.
    pub fn attributes(&self) -> SegmentAttributes {
        let bit = |index: u8| (self.typ >> index) & 1 != 0;

        match self.segment_type() {
            SegmentType::NotPresent => SegmentAttributes::NotPresent,
            SegmentType::System => SegmentAttributes::System(SystemAttributes {
                subtype: self.typ & 0xf,
            }),
            SegmentType::Code => SegmentAttributes::Code(CodeAttributes {
                accessed: bit(0),
                readable: bit(1),
                conforming: bit(2),
            }),
            SegmentType::Data => SegmentAttributes::Data(DataAttributes {
                accessed: bit(0),
                writable: bit(1),
                expand_down: bit(2),
            }),
        }
    }

    /// Checks whether the descriptor is an expand-down data segment.
    pub fn is_expand_down(&self) -> bool {
        match self.attributes() {
            SegmentAttributes::Data(data) => data.expand_down,
            _ => false,
        }
    }

    /// Returns the default operand size of a code or data segment.
    ///
    /// Returns `None` if the descriptor is not present, is a system
    /// descriptor, or has a flag combination without a defined size (L and
    /// D both set on a code segment, L set on a data segment).
    pub fn code_size(&self) -> Option<CodeSize> {
        match self.segment_type() {
            SegmentType::NotPresent | SegmentType::System => None,
            SegmentType::Code => match (self.use32, self.use64) {
                (true, true) => None,
                (false, true) => Some(CodeSize::Bits64),
                (true, false) => Some(CodeSize::Bits32),
                (false, false) => Some(CodeSize::Bits16),
            },
            SegmentType::Data => {
                if self.use64 {
                    None
                }
                else if self.use32 {
                    Some(CodeSize::Bits32)
                }
                else {
                    Some(CodeSize::Bits16)
                }
            }
        }
    }

    /// Switches the descriptor to a canonical representative of `target`.
    ///
    /// Does nothing if the descriptor is already of the requested type.
    /// Otherwise the type field is replaced and the flags that would
    /// contradict the new type are cleared, so that
    /// [`segment_type`](Self::segment_type) returns `target` afterwards.
    ///
    /// Switching to [`SegmentType::NotPresent`] resets the whole descriptor
    /// to its default, which has the present flag clear.
    pub fn change_type(&mut self, target: SegmentType) {
        let current = self.segment_type();
        if current == target {
            return;
        }

        tracing::trace!(%current, %target, "changing segment type");

        match target {
            SegmentType::NotPresent => {
                *self = Self::default();
            }
            SegmentType::System => {
                self.present = true;
                self.typ = Self::SYSTEM_TYPE;
                self.use32 = false;
                self.use64 = false;
            }
            SegmentType::Code => {
                self.present = true;
                self.typ = Self::CODE_TYPE;
            }
            SegmentType::Data => {
                self.present = true;
                self.typ = Self::DATA_TYPE;
                self.use64 = false;
            }
        }
    }

    /// Clears the fields that have no architectural meaning for the current
    /// configuration. The classification is left unchanged.
    ///
    /// - system descriptors: the L and D/B flags
    /// - 64-bit code segments: base and limit
    /// - data segments: the L flag
    pub fn clear_all_reserved(&mut self) {
        match self.segment_type() {
            SegmentType::NotPresent => {}
            SegmentType::System => {
                self.use64 = false;
                self.use32 = false;
            }
            SegmentType::Code => {
                // Base and limit are ignored in 64-bit mode, but the manuals
                // still list G and the type bits as defined there.
                if self.code_size() == Some(CodeSize::Bits64) {
                    self.base = 0;
                    self.limit = 0;
                }
            }
            SegmentType::Data => {
                self.use64 = false;
            }
        }
    }
}

impl From<u64> for SegmentDescriptor {
    fn from(value: u64) -> Self {
        Self::decode(value)
    }
}

impl From<SegmentDescriptor> for u64 {
    fn from(value: SegmentDescriptor) -> Self {
        value.encode()
    }
}

impl From<RawSegmentDescriptor> for SegmentDescriptor {
    fn from(value: RawSegmentDescriptor) -> Self {
        let flags = value.flags();

        Self {
            limit: value.limit(),
            base: value.base(),
            typ: value.typ(),
            ring: value.descriptor_privilege_level(),
            present: value.present(),
            available: flags.contains(DescriptorFlags::AVAILABLE),
            use64: flags.contains(DescriptorFlags::LONG_MODE),
            use32: flags.contains(DescriptorFlags::BIG),
            page_granularity: flags.contains(DescriptorFlags::GRANULARITY),
        }
    }
}

impl From<SegmentDescriptor> for RawSegmentDescriptor {
    fn from(value: SegmentDescriptor) -> Self {
        Self::from(value.encode())
    }
}

impl std::fmt::Display for SegmentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} (base {}, limit {}, ring {}, {})",
            Hex(self.encode()),
            Hex(self.base),
            Hex(self.limit & Self::LIMIT_MASK),
            self.ring & Self::RING_MASK,
            self.segment_type()
        )
    }
}
