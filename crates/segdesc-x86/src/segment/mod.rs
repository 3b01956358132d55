mod bounds;
pub use self::bounds::SegmentBounds;

mod descriptor;
pub use self::descriptor::SegmentDescriptor;

mod notes;
pub use self::notes::{ConfigurationNote, ConfigurationNotes, MinimumCpu};

mod raw;
pub use self::raw::{DescriptorFlags, RawSegmentDescriptor};

#[cfg(test)]
mod bounds_tests;
#[cfg(test)]
mod notes_tests;

use serde::{Deserialize, Serialize};

/// Determines the type of segment descriptor (the S flag, bit 4 of the type
/// field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescriptorType {
    /// The descriptor is for a system segment.
    System,

    /// The descriptor is for a code or data segment.
    CodeOrData,
}

/// Determines the default length for effective addresses and operands
/// referenced by instructions in the segment (the D/B flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationSize {
    /// 16-bit addresses and 16-bit or 8-bit operands are assumed.
    Default,

    /// 32-bit addresses and 32-bit or 8-bit operands are assumed.
    Big,
}

/// Determines the scaling of the segment limit field (the G flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// The segment limit is interpreted in byte units.
    Byte,

    /// The segment limit is interpreted in 4-KByte units.
    Page4K,
}

impl Granularity {
    /// Returns the size of one limit unit in bytes.
    pub fn unit_size(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Page4K => 4096,
        }
    }
}

/// Classification of a segment descriptor.
///
/// Computed from the present flag and the type field. A descriptor that is
/// not present is never classified further, whatever its type bits say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentType {
    /// The present flag is clear.
    NotPresent,

    /// A system segment or gate (S flag clear).
    System,

    /// An executable segment (S flag set, type bit 3 set).
    Code,

    /// A data or stack segment (S flag set, type bit 3 clear).
    Data,
}

impl std::fmt::Display for SegmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NotPresent => write!(f, "not present"),
            Self::System => write!(f, "system"),
            Self::Code => write!(f, "code"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// The default operand and address size of a code or data segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeSize {
    /// 16-bit segment.
    Bits16,

    /// 32-bit segment.
    Bits32,

    /// 64-bit code segment.
    Bits64,
}

impl CodeSize {
    /// Returns the size in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }
}

impl std::fmt::Display for CodeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Attributes of a code segment, taken from bits 0 to 2 of the type field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeAttributes {
    /// The segment has been accessed since the flag was last cleared.
    pub accessed: bool,

    /// The segment may be read as well as executed.
    pub readable: bool,

    /// Control may be transferred into the segment from a less privileged
    /// level without changing the CPL.
    pub conforming: bool,
}

/// Attributes of a data segment, taken from bits 0 to 2 of the type field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataAttributes {
    /// The segment has been accessed since the flag was last cleared.
    pub accessed: bool,

    /// The segment may be written as well as read.
    pub writable: bool,

    /// Valid offsets lie above the limit instead of below it.
    pub expand_down: bool,
}

/// Attributes of a system segment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemAttributes {
    /// The low four bits of the type field.
    pub subtype: u8,
}

impl SystemAttributes {
    /// Returns the legacy-mode meaning of the subtype.
    pub fn system_type(self) -> SystemType {
        SystemType::from_subtype(self.subtype)
    }
}

/// Attributes of a segment descriptor, keyed by its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentAttributes {
    /// A descriptor that is not present has no attributes.
    NotPresent,

    /// System segment attributes.
    System(SystemAttributes),

    /// Code segment attributes.
    Code(CodeAttributes),

    /// Data segment attributes.
    Data(DataAttributes),
}

impl SegmentAttributes {
    /// Returns the classification the attributes belong to.
    pub fn segment_type(&self) -> SegmentType {
        match self {
            Self::NotPresent => SegmentType::NotPresent,
            Self::System(_) => SegmentType::System,
            Self::Code(_) => SegmentType::Code,
            Self::Data(_) => SegmentType::Data,
        }
    }
}

/// Legacy-mode meaning of a system descriptor subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    /// Subtype 0, 8, 10 or 13.
    Reserved(u8),

    /// 16-bit TSS (available).
    Tss16Available,

    /// LDT.
    Ldt,

    /// 16-bit TSS (busy).
    Tss16Busy,

    /// 16-bit call gate.
    CallGate16,

    /// Task gate.
    TaskGate,

    /// 16-bit interrupt gate.
    InterruptGate16,

    /// 16-bit trap gate.
    TrapGate16,

    /// 32-bit TSS (available).
    Tss32Available,

    /// 32-bit TSS (busy).
    Tss32Busy,

    /// 32-bit call gate.
    CallGate32,

    /// 32-bit interrupt gate.
    InterruptGate32,

    /// 32-bit trap gate.
    TrapGate32,
}

impl SystemType {
    /// Decodes the low four bits of a system descriptor type field.
    pub fn from_subtype(subtype: u8) -> Self {
        match subtype & 0xf {
            0x1 => Self::Tss16Available,
            0x2 => Self::Ldt,
            0x3 => Self::Tss16Busy,
            0x4 => Self::CallGate16,
            0x5 => Self::TaskGate,
            0x6 => Self::InterruptGate16,
            0x7 => Self::TrapGate16,
            0x9 => Self::Tss32Available,
            0xb => Self::Tss32Busy,
            0xc => Self::CallGate32,
            0xe => Self::InterruptGate32,
            0xf => Self::TrapGate32,
            other => Self::Reserved(other),
        }
    }

    /// Checks whether the subtype describes a gate rather than a segment.
    pub fn is_gate(self) -> bool {
        matches!(
            self,
            Self::CallGate16
                | Self::TaskGate
                | Self::InterruptGate16
                | Self::TrapGate16
                | Self::CallGate32
                | Self::InterruptGate32
                | Self::TrapGate32
        )
    }
}

impl std::fmt::Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Reserved(subtype) => write!(f, "reserved ({subtype:#x})"),
            Self::Tss16Available => write!(f, "16-bit TSS (available)"),
            Self::Ldt => write!(f, "LDT"),
            Self::Tss16Busy => write!(f, "16-bit TSS (busy)"),
            Self::CallGate16 => write!(f, "16-bit call gate"),
            Self::TaskGate => write!(f, "task gate"),
            Self::InterruptGate16 => write!(f, "16-bit interrupt gate"),
            Self::TrapGate16 => write!(f, "16-bit trap gate"),
            Self::Tss32Available => write!(f, "32-bit TSS (available)"),
            Self::Tss32Busy => write!(f, "32-bit TSS (busy)"),
            Self::CallGate32 => write!(f, "32-bit call gate"),
            Self::InterruptGate32 => write!(f, "32-bit interrupt gate"),
            Self::TrapGate32 => write!(f, "32-bit trap gate"),
        }
    }
}
