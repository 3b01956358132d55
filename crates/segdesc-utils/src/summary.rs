use segdesc_core::Hex32Grouped;
use segdesc_x86::{SegmentBounds, SegmentDescriptor};

/// Size of a page in bytes.
const PAGE_SIZE: u64 = 4096;

/// Number of 4-KByte pages a segment spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCount {
    /// Number of whole pages.
    pub full: u64,

    /// Whether a partial page remains after the whole pages.
    pub partial: bool,
}

impl PageCount {
    /// Splits a segment size into whole pages and a remainder.
    ///
    /// A negative size has no whole pages and counts as a partial page.
    pub fn from_size(size: i64) -> Self {
        let page_size = PAGE_SIZE as i64;

        Self {
            full: (size.max(0) / page_size) as u64,
            partial: size % page_size != 0,
        }
    }
}

impl std::fmt::Display for PageCount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let plural = if self.full == 1 { "" } else { "s" };

        match (self.full, self.partial) {
            (0, false) => write!(f, "no pages"),
            (0, true) => write!(f, "1 partial page"),
            (full, false) => write!(f, "{full} page{plural}"),
            (full, true) => write!(f, "{full} page{plural} and 1 partial page"),
        }
    }
}

/// A human-oriented description of the range a segment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsSummary {
    /// The computed bounds.
    pub bounds: SegmentBounds,

    /// The size of the segment in pages.
    pub pages: PageCount,

    /// Whether the segment base is aligned to a 4-KByte boundary.
    pub base_page_aligned: bool,
}

impl BoundsSummary {
    /// Summarizes the bounds of `descriptor`.
    pub fn new(descriptor: &SegmentDescriptor) -> Self {
        let bounds = descriptor.bounds();

        Self {
            bounds,
            pages: PageCount::from_size(bounds.size),
            base_page_aligned: u64::from(descriptor.base) % PAGE_SIZE == 0,
        }
    }
}

impl std::fmt::Display for BoundsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let bounds = &self.bounds;

        if bounds.is_empty() {
            return write!(f, "empty segment");
        }

        // Every address of a non-empty range fits in 32 bits.
        let grouped = |value: u64| Hex32Grouped(value as u32);

        write!(
            f,
            "offsets {} - {}, linear {} - {}",
            grouped(bounds.internal_min),
            grouped(bounds.internal_max),
            grouped(bounds.linear_min),
            grouped(bounds.linear_max),
        )?;

        if bounds.overflow {
            write!(f, " (overflows!)")?;
        }

        let plural = if bounds.size == 1 { "" } else { "s" };
        write!(f, ", {} byte{plural}, {}", bounds.size, self.pages)?;

        if !self.base_page_aligned {
            write!(f, ", base is not page aligned")?;
        }

        Ok(())
    }
}
