/// Byte order used for every multi-byte value of a buffer.
///
/// A buffer's byte order is chosen once at construction and never changes, so
/// the reader must be configured with the same order as the writer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the running platform.
    #[inline]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    #[inline]
    pub fn is_little_endian(&self) -> bool {
        *self == Self::LittleEndian
    }

    #[inline]
    pub fn is_big_endian(&self) -> bool {
        *self == Self::BigEndian
    }
}
