use std::fmt;

use log::trace;

use crate::{BufferOptions, ByteOrder, Error, Result};

const SIZE_OF_U32: usize = size_of::<u32>();
const MIN_GROWTH: usize = 64;

/// Growable byte store with a read/write cursor and a fixed byte order.
///
/// Three quantities describe the buffer:
/// - `capacity()`: bytes allocated for the backing store,
/// - `len()`: high-water mark of written bytes, the only bytes a read can see,
/// - `position()`: cursor shared by reads and writes.
///
/// Writes overwrite at the cursor and only extend `len()` when they run past
/// it, so seeking back and rewriting a fixed-width value never shifts the bytes
/// that follow it. Writes past `capacity()` grow the store (amortized doubling)
/// and keep both the written bytes and the cursor.
///
/// A buffer is plain mutable state: share it across threads only behind
/// external synchronization.
#[derive(Clone)]
pub struct IoBuffer {
    bytes: Vec<u8>,
    len: usize,
    position: usize,
    options: BufferOptions,
}

impl Default for IoBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IoBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoBuffer")
            .field("len", &self.len)
            .field("position", &self.position)
            .field("capacity", &self.capacity())
            .field("byte_order", &self.options.byte_order)
            .finish()
    }
}

impl IoBuffer {
    /// Creates an empty little-endian buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(BufferOptions::default().with_capacity(capacity))
    }

    pub fn with_options(options: impl Into<BufferOptions>) -> Self {
        let options = options.into();
        Self {
            bytes: vec![0; options.initial_capacity],
            len: 0,
            position: 0,
            options,
        }
    }

    /// Wraps already encoded bytes for reading, cursor at the start.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_bytes_with(bytes, BufferOptions::default())
    }

    pub fn from_bytes_with(bytes: Vec<u8>, options: impl Into<BufferOptions>) -> Self {
        let options = options.into();
        let len = bytes.len();
        Self {
            bytes,
            len,
            position: 0,
            options,
        }
    }

    #[inline(always)]
    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    #[inline(always)]
    pub fn byte_order(&self) -> ByteOrder {
        self.options.byte_order
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes left between the cursor and the end of the written data.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.len - self.position
    }

    #[inline(always)]
    pub fn has_remaining(&self) -> bool {
        self.position < self.len
    }

    /// Moves the cursor to `offset`, which must not lie past `len()`.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.len {
            return Err(Error::SeekOutOfBounds {
                offset,
                len: self.len,
            });
        }
        self.position = offset;
        Ok(())
    }

    /// Moves the cursor back to the start, keeping the written bytes.
    #[inline]
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Forgets all written bytes. Capacity is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.position = 0;
    }

    /// Drops the written bytes past `len`, pulling the cursor back if needed.
    ///
    /// Does nothing when `len >= self.len()`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
            self.position = self.position.min(len);
        }
    }

    /// The written bytes, independent of the cursor.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.bytes.truncate(self.len);
        self.bytes
    }

    /// Ensures at least `additional` bytes can be written at the cursor without
    /// reallocating.
    pub fn reserve(&mut self, additional: usize) {
        let required = self
            .position
            .checked_add(additional)
            .unwrap_or_else(|| panic!("IoBuffer capacity overflow: {} + {additional}", self.position));
        self.grow_to(required);
    }

    fn grow_to(&mut self, required: usize) {
        let capacity = self.capacity();
        if required <= capacity {
            return;
        }
        let new_capacity = required.max(capacity.saturating_mul(2)).max(MIN_GROWTH);
        trace!("IoBuffer grow: {capacity} -> {new_capacity} bytes (required {required})");
        self.bytes.resize(new_capacity, 0);
    }

    /// Writes raw bytes at the cursor and advances it.
    pub fn put_bytes(&mut self, data: &[u8]) {
        let end = self.position + data.len();
        self.grow_to(end);
        self.bytes[self.position..end].copy_from_slice(data);
        self.position = end;
        self.len = self.len.max(end);
    }

    /// Reads `len` raw bytes at the cursor and advances it.
    pub fn get_bytes(&mut self, len: usize) -> Result<&[u8]> {
        self.ensure_remaining(len)?;
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..start + len])
    }

    /// Advances the cursor by `len` bytes without interpreting them.
    pub fn skip_bytes(&mut self, len: usize) -> Result<()> {
        self.ensure_remaining(len)?;
        self.position += len;
        Ok(())
    }

    /// Returns the byte at the cursor without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.ensure_remaining(1)?;
        Ok(self.bytes[self.position])
    }

    #[inline]
    pub fn ensure_remaining(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(Error::BufferUnderrun {
                position: self.position,
                needed,
                remaining,
            });
        }
        Ok(())
    }

    #[inline]
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.get_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.put_bytes(&[value]);
    }

    #[inline]
    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    #[inline]
    pub fn put_bool(&mut self, value: bool) {
        self.put_u8(value as u8);
    }

    #[inline]
    pub fn get_bool(&mut self) -> Result<bool> {
        Ok(self.get_u8()? != 0)
    }

    /// Writes a `u32` length prefix followed by the UTF-8 bytes of `value`.
    ///
    /// Nothing is written when `value` is longer than the configured maximum.
    pub fn put_string(&mut self, value: &str) -> Result<()> {
        self.check_string_len(value)?;
        let len = value.len();
        self.reserve(SIZE_OF_U32 + len);
        self.put_u32(len as u32);
        self.put_bytes(value.as_bytes());
        Ok(())
    }

    pub fn get_string(&mut self) -> Result<String> {
        let len = self.get_u32()? as usize;
        let max = self.options.max_string_len;
        if len > max {
            return Err(Error::StringTooLong { len, max });
        }
        let bytes = self.get_bytes(len)?.to_vec();
        Ok(String::from_utf8(bytes)?)
    }

    /// Fails with [`Error::StringTooLong`] if [`IoBuffer::put_string`] would reject `value`.
    #[inline]
    pub fn check_string_len(&self, value: &str) -> Result<()> {
        let len = value.len();
        let max = self.options.max_string_len.min(u32::MAX as usize);
        if len > max {
            return Err(Error::StringTooLong { len, max });
        }
        Ok(())
    }

    /// Encoded size of `value` as written by [`IoBuffer::put_string`].
    #[inline]
    pub fn string_size(value: &str) -> usize {
        SIZE_OF_U32 + value.len()
    }
}

macro_rules! impl_numeric_access {
    ($($t:ty => $put:ident, $get:ident);* $(;)?) => {
        impl IoBuffer {
            $(
                #[inline]
                pub fn $put(&mut self, value: $t) {
                    let bytes = match self.options.byte_order {
                        ByteOrder::LittleEndian => value.to_le_bytes(),
                        ByteOrder::BigEndian => value.to_be_bytes(),
                    };
                    self.put_bytes(&bytes);
                }

                #[inline]
                pub fn $get(&mut self) -> Result<$t> {
                    let bytes = self.take_array::<{ size_of::<$t>() }>()?;
                    Ok(match self.options.byte_order {
                        ByteOrder::LittleEndian => <$t>::from_le_bytes(bytes),
                        ByteOrder::BigEndian => <$t>::from_be_bytes(bytes),
                    })
                }
            )*
        }
    };
}

impl_numeric_access!(
    i8 => put_i8, get_i8;
    i16 => put_i16, get_i16;
    i32 => put_i32, get_i32;
    i64 => put_i64, get_i64;
    u32 => put_u32, get_u32;
    f32 => put_f32, get_f32;
    f64 => put_f64, get_f64;
);
