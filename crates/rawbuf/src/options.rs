use crate::ByteOrder;

/// Default initial capacity of a buffer (4 KiB).
pub const DEFAULT_CAPACITY: usize = 4096;

/// Default upper bound on the length of a string accepted by `get_string` (64 MiB).
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;

/// Options for creating buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    /// Bytes allocated up front for the backing store.
    pub initial_capacity: usize,
    /// Byte order of every multi-byte value.
    pub byte_order: ByteOrder,
    /// Longest string (in bytes) a read will accept before failing.
    pub max_string_len: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            byte_order: ByteOrder::default(),
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}

impl BufferOptions {
    pub fn new(initial_capacity: usize, byte_order: ByteOrder) -> Self {
        Self {
            initial_capacity,
            byte_order,
            ..Default::default()
        }
    }

    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }
}

impl From<ByteOrder> for BufferOptions {
    fn from(byte_order: ByteOrder) -> Self {
        Self::default().with_byte_order(byte_order)
    }
}

impl From<(usize, ByteOrder)> for BufferOptions {
    fn from((initial_capacity, byte_order): (usize, ByteOrder)) -> Self {
        Self::new(initial_capacity, byte_order)
    }
}
