use serde::{Deserialize, Serialize};

use super::{OperationSize, SegmentDescriptor};

/// The address range covered by a segment.
///
/// Internal addresses are offsets relative to the segment base, linear
/// addresses are the same range after the base is added.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentBounds {
    /// The unclamped end of the linear range lies above 4 GBytes.
    pub overflow: bool,

    /// Size of the segment.
    ///
    /// For expand-down segments this is the number of valid offsets, which
    /// is negative when the range is empty. For expand-up segments it is the
    /// scaled limit minus one, so a zero limit yields -1.
    pub size: i64,

    /// Lowest valid offset.
    pub internal_min: u64,

    /// Highest valid offset.
    pub internal_max: u64,

    /// Lowest linear address.
    pub linear_min: u64,

    /// Highest linear address, clamped to the 4-GByte address space.
    pub linear_max: u64,
}

impl SegmentBounds {
    /// Highest linear address.
    pub const LINEAR_LIMIT: u64 = 0xffff_ffff;

    /// Highest offset of a segment with the D/B flag clear.
    pub const TOP_16: u64 = 0xffff;

    /// Highest offset of a segment with the D/B flag set.
    pub const TOP_32: u64 = 0xffff_ffff;

    /// Checks whether no offset is valid.
    ///
    /// This happens for expand-down segments whose limit reaches past the
    /// upper bound selected by the B flag.
    pub fn is_empty(&self) -> bool {
        self.internal_max < self.internal_min
    }
}

impl SegmentDescriptor {
    /// Computes the range of offsets and linear addresses the segment covers.
    ///
    /// For expand-up segments the valid offsets run from 0 to the scaled
    /// limit; with page granularity the low 12 bits of an offset are not
    /// checked, so the range ends at the last byte of the last page. For
    /// expand-down segments the valid offsets run from the scaled limit plus
    /// one unit to FFFFH or FFFFFFFFH, depending on the B flag.
    ///
    /// The arithmetic is exact; an end address past 4 GBytes is clamped and
    /// reported through [`SegmentBounds::overflow`].
    pub fn bounds(&self) -> SegmentBounds {
        let unit = self.granularity().unit_size() as i64;
        let top = match self.operation_size() {
            OperationSize::Big => SegmentBounds::TOP_32,
            OperationSize::Default => SegmentBounds::TOP_16,
        };

        let limit = i64::from(self.limit & Self::LIMIT_MASK);
        let base = i64::from(self.base);

        let (internal_min, internal_max, size, max) = if self.is_expand_down() {
            let internal_min = (limit + 1) * unit;
            let size = top as i64 - internal_min + 1;

            (internal_min, top as i64, size, base + size - 1)
        }
        else {
            let scaled = limit * unit;
            let internal_max = scaled + (unit - 1);

            (0, internal_max, scaled - 1, base + internal_max)
        };

        SegmentBounds {
            overflow: max > SegmentBounds::LINEAR_LIMIT as i64,
            size,
            internal_min: internal_min as u64,
            internal_max: internal_max as u64,
            linear_min: base as u64,
            linear_max: max.clamp(0, SegmentBounds::LINEAR_LIMIT as i64) as u64,
        }
    }
}
