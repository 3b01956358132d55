//! x86 segment descriptor definitions.
//!
//! The central type is [`SegmentDescriptor`], the structured form of one
//! 8-byte GDT/LDT entry. It converts losslessly to and from its packed `u64`
//! form and answers the questions a reader of the raw value usually has:
//! what kind of segment it is, which attributes are set, which addresses it
//! covers and whether the configuration is legal at all.

mod segment;

pub use self::segment::{
    CodeAttributes, CodeSize, ConfigurationNote, ConfigurationNotes, DataAttributes,
    DescriptorFlags, DescriptorType, Granularity, MinimumCpu, OperationSize,
    RawSegmentDescriptor, SegmentAttributes, SegmentBounds, SegmentDescriptor, SegmentType,
    SystemAttributes, SystemType,
};
