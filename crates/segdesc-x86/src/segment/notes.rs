use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{CodeSize, SegmentAttributes, SegmentDescriptor};

/// The oldest processor generation that can load a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MinimumCpu {
    /// Intel 80286.
    I286,

    /// Intel 80386.
    I386,

    /// Any x86-64 processor.
    X86_64,
}

impl std::fmt::Display for MinimumCpu {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::I286 => write!(f, "286"),
            Self::I386 => write!(f, "386"),
            Self::X86_64 => write!(f, "x86-64"),
        }
    }
}

/// A remark about the configuration of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigurationNote {
    /// A bit is set that the processor ignores or forbids in this
    /// configuration.
    Reserved,

    /// The configuration is not a legal descriptor.
    Invalid,

    /// The descriptor requires at least the given processor.
    Compatible(MinimumCpu),
}

impl std::fmt::Display for ConfigurationNote {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Reserved => write!(f, "reserved"),
            Self::Invalid => write!(f, "invalid"),
            Self::Compatible(cpu) => write!(f, "{cpu}-compat"),
        }
    }
}

/// The ordered notes of a descriptor.
///
/// `Reserved` comes before `Invalid`, and the compatibility note is always
/// last.
pub type ConfigurationNotes = SmallVec<[ConfigurationNote; 3]>;

/// System subtypes that do not describe a segment descriptor (gates, which
/// have a different layout, and the reserved encodings).
const INVALID_SYSTEM_SUBTYPES: [u8; 10] = [0, 4, 6, 7, 8, 10, 12, 13, 14, 15];

/// System subtypes introduced with the 80386.
const SYSTEM_SUBTYPES_386: [u8; 5] = [9, 11, 12, 14, 15];

impl SegmentDescriptor {
    /// Checks whether any field is set that the 80286 did not have.
    fn uses_386_fields(&self) -> bool {
        (self.limit & Self::LIMIT_MASK) >> 16 != 0
            || self.available
            || self.use64
            || self.use32
            || self.page_granularity
            || self.base >> 24 != 0
    }

    /// Evaluates the configuration of the descriptor.
    ///
    /// The result holds `Reserved` and `Invalid` as they apply, followed by
    /// the minimum processor the descriptor is compatible with. Invalid
    /// configurations have no minimum processor, so the compatibility note
    /// is never reported together with `Invalid`.
    pub fn configuration_notes(&self) -> ConfigurationNotes {
        let mut notes = ConfigurationNotes::new();

        let mut minimum = Some(if self.uses_386_fields() {
            MinimumCpu::I386
        }
        else {
            MinimumCpu::I286
        });

        match self.attributes() {
            SegmentAttributes::NotPresent => {}
            SegmentAttributes::System(system) => {
                if self.use64 || self.use32 {
                    notes.push(ConfigurationNote::Reserved);
                }

                if INVALID_SYSTEM_SUBTYPES.contains(&system.subtype) {
                    notes.push(ConfigurationNote::Invalid);
                    minimum = None;
                }
                else if SYSTEM_SUBTYPES_386.contains(&system.subtype) {
                    minimum = Some(MinimumCpu::I386);
                }
            }
            SegmentAttributes::Code(_) => match self.code_size() {
                None => {
                    notes.push(ConfigurationNote::Invalid);
                    minimum = None;
                }
                Some(CodeSize::Bits64) => {
                    minimum = Some(MinimumCpu::X86_64);

                    if self.base != 0 || self.limit & Self::LIMIT_MASK != 0 {
                        notes.push(ConfigurationNote::Reserved);
                    }
                }
                Some(CodeSize::Bits32 | CodeSize::Bits16) => {}
            },
            SegmentAttributes::Data(_) => {
                if self.use64 {
                    notes.push(ConfigurationNote::Reserved);
                    minimum = None;
                }
            }
        }

        if let Some(minimum) = minimum {
            notes.push(ConfigurationNote::Compatible(minimum));
        }

        notes
    }

    /// Returns the oldest processor that can load the descriptor, or `None`
    /// if no processor accepts the configuration.
    pub fn minimum_cpu(&self) -> Option<MinimumCpu> {
        self.configuration_notes()
            .into_iter()
            .find_map(|note| match note {
                ConfigurationNote::Compatible(cpu) => Some(cpu),
                _ => None,
            })
    }

    /// Checks whether the configuration is a legal descriptor.
    pub fn is_valid(&self) -> bool {
        !self
            .configuration_notes()
            .contains(&ConfigurationNote::Invalid)
    }

    /// Checks whether any reserved field is in use.
    pub fn has_reserved_bits(&self) -> bool {
        self.configuration_notes()
            .contains(&ConfigurationNote::Reserved)
    }
}
