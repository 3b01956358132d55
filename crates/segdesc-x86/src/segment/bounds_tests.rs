use super::{SegmentBounds, SegmentDescriptor};

const EXPAND_DOWN_DATA: u8 = 0b1_0110;

fn data(limit: u32, base: u32, use32: bool, page_granularity: bool) -> SegmentDescriptor {
    SegmentDescriptor {
        limit,
        base,
        typ: SegmentDescriptor::DATA_TYPE,
        present: true,
        use32,
        page_granularity,
        ..Default::default()
    }
}

fn expand_down(limit: u32, base: u32, use32: bool, page_granularity: bool) -> SegmentDescriptor {
    SegmentDescriptor {
        typ: EXPAND_DOWN_DATA,
        ..data(limit, base, use32, page_granularity)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Expand-up
///////////////////////////////////////////////////////////////////////////////

#[test]
fn byte_granular_full_limit() {
    let bounds = data(0xf_ffff, 0, true, false).bounds();

    assert_eq!(
        bounds,
        SegmentBounds {
            overflow: false,
            size: 0xf_fffe,
            internal_min: 0,
            internal_max: 0xf_ffff,
            linear_min: 0,
            linear_max: 0xf_ffff,
        }
    );
    assert!(!bounds.is_empty());
}

#[test]
fn flat_4g_segment() {
    let bounds = SegmentDescriptor::decode(0x00cf_9a00_0000_ffff).bounds();

    assert_eq!(bounds.internal_min, 0);
    assert_eq!(bounds.internal_max, 0xffff_ffff);
    assert_eq!(bounds.size, 0xffff_efff);
    assert_eq!(bounds.linear_max, 0xffff_ffff);
    assert!(!bounds.overflow);
}

#[test]
fn page_granularity_covers_whole_last_page() {
    let bounds = data(0, 0x1000, true, true).bounds();

    assert_eq!(bounds.internal_max, 0xfff);
    assert_eq!(bounds.size, -1);
    assert_eq!(bounds.linear_min, 0x1000);
    assert_eq!(bounds.linear_max, 0x1fff);
}

#[test]
fn zero_limit_byte_granular_has_negative_size() {
    let bounds = data(0, 0x500, false, false).bounds();

    assert_eq!(bounds.internal_max, 0);
    assert_eq!(bounds.size, -1);
    assert!(!bounds.is_empty());
    assert_eq!(bounds.linear_max, 0x500);
}

#[test]
fn linear_end_past_4g_overflows() {
    let bounds = data(0xf_ffff, 0x1000, true, true).bounds();

    assert!(bounds.overflow);
    assert_eq!(bounds.linear_min, 0x1000);
    assert_eq!(bounds.linear_max, 0xffff_ffff);
    assert_eq!(bounds.size, 0xffff_efff);
}

#[test]
fn linear_end_exactly_at_4g_does_not_overflow() {
    let bounds = data(0xffff, 0xffff_0000, true, false).bounds();

    assert!(!bounds.overflow);
    assert_eq!(bounds.linear_max, 0xffff_ffff);
}

#[test]
fn conforming_code_is_not_expand_down() {
    let descriptor = SegmentDescriptor {
        typ: 0b1_1100,
        ..data(0x10, 0, true, false)
    };

    let bounds = descriptor.bounds();
    assert_eq!(bounds.internal_min, 0);
    assert_eq!(bounds.internal_max, 0x10);
}

#[test]
fn expand_up_size_is_scaled_limit_minus_one() {
    assert_eq!(data(0x10, 0, true, false).bounds().size, 0xf);
    assert_eq!(data(0x10, 0, true, true).bounds().size, 0x10 * 0x1000 - 1);

    // The linear end follows the offset range, not the size.
    let bounds = data(0x10, 0x2000, true, false).bounds();
    assert_eq!(bounds.internal_max, 0x10);
    assert_eq!(bounds.linear_max, 0x2010);
}

///////////////////////////////////////////////////////////////////////////////
// Expand-down
///////////////////////////////////////////////////////////////////////////////

#[test]
fn expand_down_zero_limit_32_bit() {
    let bounds = expand_down(0, 0, true, false).bounds();

    assert_eq!(bounds.internal_min, 1);
    assert_eq!(bounds.internal_max, 0xffff_ffff);
    assert_eq!(bounds.size, 0xffff_ffff);
    assert_eq!(bounds.linear_min, 0);
    assert_eq!(bounds.linear_max, 0xffff_fffe);
    assert!(!bounds.overflow);
}

#[test]
fn expand_down_16_bit_page_granular() {
    let bounds = expand_down(0, 0x2_0000, false, true).bounds();

    assert_eq!(bounds.internal_min, 0x1000);
    assert_eq!(bounds.internal_max, 0xffff);
    assert_eq!(bounds.size, 0xf000);
    assert_eq!(bounds.linear_min, 0x2_0000);
    assert_eq!(bounds.linear_max, 0x2_efff);
}

#[test]
fn expand_down_past_upper_bound_is_empty() {
    let bounds = expand_down(0xffff, 0, false, false).bounds();

    assert_eq!(bounds.internal_min, 0x1_0000);
    assert_eq!(bounds.internal_max, 0xffff);
    assert_eq!(bounds.size, 0);
    assert!(bounds.is_empty());
    assert_eq!(bounds.linear_max, 0);
    assert!(!bounds.overflow);

    let bounds = expand_down(0xf_ffff, 0x100, false, true).bounds();
    assert!(bounds.is_empty());
    assert_eq!(bounds.size, -0xffff_0000);
    assert_eq!(bounds.internal_min, 0x1_0000_0000);
    assert_eq!(bounds.linear_min, 0x100);
    assert_eq!(bounds.linear_max, 0);
}

#[test]
fn expand_down_overflow() {
    let bounds = expand_down(0, 0xffff_0000, true, false).bounds();

    assert!(bounds.overflow);
    assert_eq!(bounds.linear_max, 0xffff_ffff);
}

#[test]
fn expand_down_uses_b_flag_not_classification() {
    let narrow = expand_down(0xff, 0, false, false).bounds();
    let wide = expand_down(0xff, 0, true, false).bounds();

    assert_eq!(narrow.internal_max, SegmentBounds::TOP_16);
    assert_eq!(wide.internal_max, SegmentBounds::TOP_32);
    assert_eq!(narrow.size, 0xff00);
    assert_eq!(wide.size, 0xffff_ff00);
}

///////////////////////////////////////////////////////////////////////////////
// Field masking
///////////////////////////////////////////////////////////////////////////////

#[test]
fn oversized_limit_is_masked() {
    assert_eq!(
        data(0xff_ffff, 0, true, false).bounds(),
        data(0xf_ffff, 0, true, false).bounds()
    );
}
