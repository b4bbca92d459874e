use std::{result, string::FromUtf8Error};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for buffer operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Buffer underrun at position {position}: need {needed} bytes, only {remaining} remaining"
    )]
    BufferUnderrun {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Seek to {offset} is beyond buffer length {len}")]
    SeekOutOfBounds { offset: usize, len: usize },

    #[error("String is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("String length {len} exceeds the configured maximum of {max} bytes")]
    StringTooLong { len: usize, max: usize },
}

impl Error {
    #[inline]
    pub fn is_underrun(&self) -> bool {
        matches!(self, Self::BufferUnderrun { .. })
    }
}
