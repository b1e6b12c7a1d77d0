use std::{error::Error, fmt};

use bytesize::ByteSize;

/// An error where a checked access named an index past the live elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    /// The requested index.
    pub index: usize,
    /// The number of live elements at the time of the access.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index out of range: the len is {} but the index is {}",
            self.len, self.index
        )
    }
}

impl Error for OutOfRange {}

/// An error with reserving memory for array slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested slot count does not fit in `isize::MAX` bytes.
    CapacityOverflow,
    /// The global allocator could not provide the requested block.
    OutOfMemory {
        /// Size of the failed request.
        bytes: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::OutOfMemory { bytes } => write!(
                f,
                "out of memory: failed to allocate {}",
                ByteSize::b(*bytes as u64).to_string_as(true)
            ),
        }
    }
}

impl Error for AllocError {}
