/// An error that can occur when working with segment descriptors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SegdescError {
    /// The text contains a character outside the digit set of its base, or
    /// contains no digits at all.
    #[error("Malformed number")]
    Malformed,

    /// The value does not fit into the field it is written to.
    #[error("Value {value:#x} is too large (max {max:#x})")]
    TooLarge {
        /// The parsed value.
        value: u64,

        /// The largest value the field accepts.
        max: u64,
    },

    /// The number does not fit into 64 bits.
    #[error("Number does not fit into 64 bits")]
    Overflow,

    /// A raw descriptor was given with the wrong number of bytes.
    #[error("Invalid length (expected {expected} bytes, got {actual})")]
    InvalidLength {
        /// The number of bytes required.
        expected: usize,

        /// The number of bytes given.
        actual: usize,
    },

    /// Other error.
    #[error("{0}")]
    Other(&'static str),
}

impl SegdescError {
    /// Creates a new "too large" error.
    pub fn too_large(value: u64, max: u64) -> Self {
        Self::TooLarge { value, max }
    }

    /// Creates a new "invalid length" error.
    pub fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }
}
