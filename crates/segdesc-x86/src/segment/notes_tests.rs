use super::{ConfigurationNote, MinimumCpu, SegmentDescriptor};

fn notes(descriptor: &SegmentDescriptor) -> Vec<String> {
    descriptor
        .configuration_notes()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn notes_of(value: u64) -> Vec<String> {
    notes(&SegmentDescriptor::decode(value))
}

fn present_with_type(typ: u8) -> SegmentDescriptor {
    SegmentDescriptor {
        typ,
        present: true,
        ..Default::default()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Minimum CPU
///////////////////////////////////////////////////////////////////////////////

#[test]
fn flat_code_needs_386() {
    assert_eq!(notes_of(0x00cf_9a00_0000_ffff), ["386-compat"]);
}

#[test]
fn plain_16_bit_segments_run_on_286() {
    assert_eq!(notes_of(0x0000_9a00_0000_ffff), ["286-compat"]);
    assert_eq!(notes_of(0x0000_9200_0000_ffff), ["286-compat"]);
    assert_eq!(notes_of(0), ["286-compat"]);
}

#[test]
fn each_386_field_escalates() {
    let base = present_with_type(SegmentDescriptor::DATA_TYPE);

    let escalating = [
        SegmentDescriptor {
            limit: 0x1_0000,
            ..base
        },
        SegmentDescriptor {
            available: true,
            ..base
        },
        SegmentDescriptor {
            use32: true,
            ..base
        },
        SegmentDescriptor {
            page_granularity: true,
            ..base
        },
        SegmentDescriptor {
            base: 0x0100_0000,
            ..base
        },
    ];

    for descriptor in escalating {
        assert_eq!(descriptor.minimum_cpu(), Some(MinimumCpu::I386), "{descriptor:?}");
    }

    // 24-bit bases and 16-bit limits were already available on the 286.
    let descriptor = SegmentDescriptor {
        base: 0x00ff_ffff,
        limit: 0xffff,
        ..base
    };
    assert_eq!(descriptor.minimum_cpu(), Some(MinimumCpu::I286));
}

#[test]
fn not_present_still_reports_compatibility() {
    assert_eq!(notes_of(1 << 54), ["386-compat"]);
    assert_eq!(notes_of(0x0000_1a00_0000_ffff), ["286-compat"]);
}

#[test]
fn minimum_cpu_order() {
    assert!(MinimumCpu::I286 < MinimumCpu::I386);
    assert!(MinimumCpu::I386 < MinimumCpu::X86_64);
}

///////////////////////////////////////////////////////////////////////////////
// System segments
///////////////////////////////////////////////////////////////////////////////

#[test]
fn valid_system_subtypes() {
    assert_eq!(notes(&present_with_type(0x1)), ["286-compat"]);
    assert_eq!(notes(&present_with_type(0x2)), ["286-compat"]);
    assert_eq!(notes(&present_with_type(0x3)), ["286-compat"]);
    assert_eq!(notes(&present_with_type(0x5)), ["286-compat"]);
    assert_eq!(notes(&present_with_type(0x9)), ["386-compat"]);
    assert_eq!(notes(&present_with_type(0xb)), ["386-compat"]);
}

#[test]
fn invalid_system_subtypes() {
    for subtype in [0, 4, 6, 7, 8, 10, 12, 13, 14, 15] {
        let descriptor = present_with_type(subtype);

        assert_eq!(notes(&descriptor), ["invalid"], "subtype {subtype}");
        assert!(!descriptor.is_valid());
        assert_eq!(descriptor.minimum_cpu(), None);
    }
}

#[test]
fn size_flags_are_reserved_on_system_segments() {
    let descriptor = SegmentDescriptor {
        use32: true,
        ..present_with_type(0x2)
    };
    assert_eq!(notes(&descriptor), ["reserved", "386-compat"]);
    assert!(descriptor.has_reserved_bits());

    let descriptor = SegmentDescriptor {
        use64: true,
        ..present_with_type(0xc)
    };
    assert_eq!(notes(&descriptor), ["reserved", "invalid"]);
}

///////////////////////////////////////////////////////////////////////////////
// Code segments
///////////////////////////////////////////////////////////////////////////////

#[test]
fn code_with_both_size_flags_is_invalid() {
    assert_eq!(notes_of(0x00ef_9a00_0000_ffff), ["invalid"]);
}

#[test]
fn long_mode_code() {
    assert_eq!(notes_of(0x0020_9a00_0000_0000), ["x86-64-compat"]);
    assert_eq!(notes_of(0x00af_9a00_0000_ffff), ["reserved", "x86-64-compat"]);
    assert_eq!(notes_of(0x0020_9a00_0001_0000), ["reserved", "x86-64-compat"]);

    let descriptor = SegmentDescriptor::decode(0x0020_9a00_0000_0000);
    assert_eq!(descriptor.minimum_cpu(), Some(MinimumCpu::X86_64));
    assert!(descriptor.is_valid());
    assert!(!descriptor.has_reserved_bits());
}

///////////////////////////////////////////////////////////////////////////////
// Data segments
///////////////////////////////////////////////////////////////////////////////

#[test]
fn long_mode_flag_is_reserved_on_data() {
    assert_eq!(notes_of(0x0020_9200_0000_ffff), ["reserved"]);

    let descriptor = SegmentDescriptor::decode(0x0020_9200_0000_ffff);
    assert!(descriptor.is_valid());
    assert_eq!(descriptor.minimum_cpu(), None);
}

///////////////////////////////////////////////////////////////////////////////
// Invariants
///////////////////////////////////////////////////////////////////////////////

#[test]
fn invalid_never_comes_with_compatibility() {
    for typ in 0..=SegmentDescriptor::TYPE_MASK {
        for bits in 0..32u8 {
            let descriptor = SegmentDescriptor {
                typ,
                present: bits & 1 != 0,
                available: bits & 2 != 0,
                use32: bits & 4 != 0,
                use64: bits & 8 != 0,
                page_granularity: bits & 16 != 0,
                ..Default::default()
            };

            let notes = descriptor.configuration_notes();
            let invalid = notes.contains(&ConfigurationNote::Invalid);
            let compatible = notes
                .iter()
                .any(|note| matches!(note, ConfigurationNote::Compatible(_)));

            assert!(!(invalid && compatible), "{descriptor:?}: {notes:?}");
            assert!(notes.len() <= 3);

            // The compatibility note, when present, is always last.
            if compatible {
                assert!(matches!(notes.last(), Some(ConfigurationNote::Compatible(_))));
            }
        }
    }
}

#[test]
fn note_display() {
    assert_eq!(ConfigurationNote::Reserved.to_string(), "reserved");
    assert_eq!(ConfigurationNote::Invalid.to_string(), "invalid");
    assert_eq!(
        ConfigurationNote::Compatible(MinimumCpu::X86_64).to_string(),
        "x86-64-compat"
    );
}
