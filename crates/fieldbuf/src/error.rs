use std::result;

use thiserror::Error;

use crate::{DataType, Version};

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for encoding and decoding field streams.
///
/// Every variant aborts the current encode or decode call. Decoding never
/// rolls the buffer cursor back: after an error it points at the place where
/// the failure was detected.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Buffer(#[from] rawbuf::Error),

    #[error("Corrupt header at position {position}: unknown type tag {tag}")]
    CorruptHeader { tag: u8, position: usize },

    #[error("Corrupt header at position {position}: {count} dimensions exceeds the maximum of {max}")]
    TooManyDimensions {
        count: usize,
        max: usize,
        position: usize,
    },

    #[error("Corrupt start marker at position {position}: found byte {found}")]
    CorruptStartMarker { found: u8, position: usize },

    #[error("Corrupt end marker at position {position}: found byte {found}")]
    CorruptEndMarker { found: u8, position: usize },

    #[error("Type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: DataType,
        found: DataType,
    },

    #[error("Corrupt payload for field '{field}': declared {declared}, decoded {actual}")]
    CorruptPayload {
        field: String,
        declared: usize,
        actual: usize,
    },

    #[error("Shape {dims:?} does not match {len} elements")]
    ShapeMismatch { dims: Vec<u32>, len: usize },

    #[error("Payload of {len} bytes or elements does not fit a 32-bit slot")]
    PayloadTooLarge { len: usize },

    #[error("Size patch for block starting at {data_start} resolved with cursor at {position}")]
    PatchOutOfOrder { data_start: usize, position: usize },

    #[error("Different wire version found: {found:?}, expected: {expected:?}")]
    DifferentVersion { found: Version, expected: Version },
}

impl Error {
    /// True when the stream ended before a read could be satisfied.
    #[inline]
    pub fn is_underrun(&self) -> bool {
        matches!(self, Self::Buffer(e) if e.is_underrun())
    }

    /// True for read failures that mean the stream itself is malformed or
    /// truncated, as opposed to a mismatch between what the reader expects and
    /// what a well-formed stream contains.
    pub fn is_corrupt_stream(&self) -> bool {
        match self {
            Self::Buffer(e) => match e {
                rawbuf::Error::BufferUnderrun { .. }
                | rawbuf::Error::InvalidUtf8(_)
                | rawbuf::Error::StringTooLong { .. } => true,
                rawbuf::Error::SeekOutOfBounds { .. } => false,
            },
            Self::CorruptHeader { .. }
            | Self::TooManyDimensions { .. }
            | Self::CorruptStartMarker { .. }
            | Self::CorruptEndMarker { .. }
            | Self::CorruptPayload { .. } => true,
            Self::TypeMismatch { .. }
            | Self::ShapeMismatch { .. }
            | Self::PayloadTooLarge { .. }
            | Self::PatchOutOfOrder { .. }
            | Self::DifferentVersion { .. } => false,
        }
    }
}
