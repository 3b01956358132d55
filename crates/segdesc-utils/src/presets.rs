//! Well-known descriptor values.

use segdesc_x86::SegmentDescriptor;

/// A named descriptor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Short identifier.
    pub name: &'static str,

    /// One-line description.
    pub description: &'static str,

    /// The packed descriptor.
    pub value: u64,
}

impl Preset {
    /// Decodes the preset.
    pub fn descriptor(&self) -> SegmentDescriptor {
        SegmentDescriptor::decode(self.value)
    }
}

/// All presets, in display order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "null",
        description: "Null descriptor (GDT entry 0)",
        value: 0x0000_0000_0000_0000,
    },
    Preset {
        name: "kernel-code32",
        description: "Flat 4 GiB ring 0 code, 32-bit",
        value: 0x00cf_9a00_0000_ffff,
    },
    Preset {
        name: "kernel-data32",
        description: "Flat 4 GiB ring 0 data, 32-bit",
        value: 0x00cf_9200_0000_ffff,
    },
    Preset {
        name: "user-code32",
        description: "Flat 4 GiB ring 3 code, 32-bit",
        value: 0x00cf_fa00_0000_ffff,
    },
    Preset {
        name: "user-data32",
        description: "Flat 4 GiB ring 3 data, 32-bit",
        value: 0x00cf_f200_0000_ffff,
    },
    Preset {
        name: "kernel-code64",
        description: "Ring 0 code, 64-bit",
        value: 0x0020_9a00_0000_0000,
    },
    Preset {
        name: "user-code64",
        description: "Ring 3 code, 64-bit",
        value: 0x0020_fa00_0000_0000,
    },
    Preset {
        name: "code16",
        description: "64 KiB ring 0 code, 16-bit",
        value: 0x0000_9a00_0000_ffff,
    },
    Preset {
        name: "data16",
        description: "64 KiB ring 0 data, 16-bit",
        value: 0x0000_9200_0000_ffff,
    },
];

/// Looks up a preset by name.
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

#[cfg(test)]
mod tests {
    use segdesc_x86::{CodeSize, ConfigurationNote, MinimumCpu, SegmentType};

    use super::*;

    #[test]
    fn presets_are_valid_and_clean() {
        for preset in PRESETS {
            let descriptor = preset.descriptor();

            assert!(descriptor.is_valid(), "{}", preset.name);
            assert!(!descriptor.has_reserved_bits(), "{}", preset.name);
        }
    }

    #[test]
    fn preset_names_are_unique() {
        for (index, preset) in PRESETS.iter().enumerate() {
            assert!(
                PRESETS[index + 1..]
                    .iter()
                    .all(|other| other.name != preset.name)
            );
        }
    }

    #[test]
    fn preset_classification() {
        let check = |name, segment_type, code_size, ring| {
            let descriptor = find(name).map(Preset::descriptor);

            assert_eq!(
                descriptor.map(|d| (d.segment_type(), d.code_size(), d.ring)),
                Some((segment_type, code_size, ring)),
                "{name}"
            );
        };

        check("null", SegmentType::NotPresent, None, 0);
        check("kernel-code32", SegmentType::Code, Some(CodeSize::Bits32), 0);
        check("kernel-data32", SegmentType::Data, Some(CodeSize::Bits32), 0);
        check("user-code32", SegmentType::Code, Some(CodeSize::Bits32), 3);
        check("user-data32", SegmentType::Data, Some(CodeSize::Bits32), 3);
        check("kernel-code64", SegmentType::Code, Some(CodeSize::Bits64), 0);
        check("user-code64", SegmentType::Code, Some(CodeSize::Bits64), 3);
        check("code16", SegmentType::Code, Some(CodeSize::Bits16), 0);
        check("data16", SegmentType::Data, Some(CodeSize::Bits16), 0);
    }

    #[test]
    fn long_mode_presets_need_x86_64() {
        let descriptor = find("kernel-code64").map(Preset::descriptor);

        assert_eq!(
            descriptor.map(|d| d.configuration_notes().into_vec()),
            Some(vec![ConfigurationNote::Compatible(MinimumCpu::X86_64)])
        );
    }

    #[test]
    fn unknown_preset() {
        assert_eq!(find("tss"), None);
    }
}
