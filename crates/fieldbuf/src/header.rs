//! Field header codec.
//!
//! Every value on the wire is preceded by a header with the same layout for
//! every type tag:
//!
//! ```text
//! size      field
//! 1         type tag (see DataType)
//! 4         field name length (u32)
//! N         field name (UTF-8)
//! 4         payload length (u32), the length slot
//! 4         dimension count (u32)
//! 4 × D     dimensions (u32 each, row-major shape)
//! ```
//!
//! The payload length counts the bytes after the last dimension, so a reader
//! can always jump over a field it does not want to interpret.

use log::trace;
use rawbuf::IoBuffer;
use smallvec::SmallVec;

use crate::{DataType, Error, Result};

/// Upper bound on the number of dimensions a header may declare.
pub const MAX_DIMENSIONS: usize = 32;

/// Payload length of a START/END marker: the single marker byte.
pub const MARKER_PAYLOAD_LEN: u32 = 1;

const SIZE_OF_U32: usize = size_of::<u32>();

/// Array shape as carried by a header.
pub type Dims = SmallVec<[u32; 4]>;

/// Decoded field descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHeader {
    data_type: DataType,
    name: String,
    payload_len: u32,
    dims: Dims,
    /// Buffer offset of the type tag.
    header_start: usize,
    /// Buffer offset of the first payload byte.
    data_start: usize,
}

impl FieldHeader {
    #[inline(always)]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn payload_len(&self) -> usize {
        self.payload_len as usize
    }

    #[inline(always)]
    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    #[inline(always)]
    pub fn header_start(&self) -> usize {
        self.header_start
    }

    #[inline(always)]
    pub fn data_start(&self) -> usize {
        self.data_start
    }

    /// Buffer offset right after the payload.
    #[inline(always)]
    pub fn data_end(&self) -> usize {
        self.data_start + self.payload_len as usize
    }

    /// Number of elements described by the dimensions (1 for a header without any).
    ///
    /// Saturates instead of overflowing on absurd shapes.
    pub fn element_count(&self) -> usize {
        self.dims
            .iter()
            .fold(1usize, |count, &dim| count.saturating_mul(dim as usize))
    }

    /// Fails with [`Error::TypeMismatch`] unless the header carries `expected`.
    pub fn expect_type(&self, expected: DataType) -> Result<()> {
        if self.data_type != expected {
            return Err(Error::TypeMismatch {
                field: self.name.clone(),
                expected,
                found: self.data_type,
            });
        }
        Ok(())
    }
}

/// Encoded size of a header for a field called `name` with `dims` dimensions.
#[inline]
pub fn header_size(name: &str, dims: usize) -> usize {
    1 + IoBuffer::string_size(name) + SIZE_OF_U32 * (2 + dims)
}

/// Writes a field header and returns the offset of its payload length slot.
///
/// The slot is fixed-width, so the returned offset can later be used to
/// overwrite `payload_len` once the real size is known (see
/// [`crate::begin_sized_block`]). Nothing is written when the header is
/// rejected.
pub fn put_field_header(
    buffer: &mut IoBuffer,
    name: &str,
    data_type: DataType,
    payload_len: usize,
    dims: &[u32],
) -> Result<usize> {
    put_field_header_reserving(buffer, name, data_type, payload_len, dims, payload_len)
}

/// Same as [`put_field_header`], reserving room for `reserve` payload bytes
/// instead of `payload_len`.
pub(crate) fn put_field_header_reserving(
    buffer: &mut IoBuffer,
    name: &str,
    data_type: DataType,
    payload_len: usize,
    dims: &[u32],
    reserve: usize,
) -> Result<usize> {
    let payload_len =
        u32::try_from(payload_len).map_err(|_| Error::PayloadTooLarge { len: payload_len })?;
    if dims.len() > MAX_DIMENSIONS {
        return Err(Error::TooManyDimensions {
            count: dims.len(),
            max: MAX_DIMENSIONS,
            position: buffer.position(),
        });
    }
    buffer.check_string_len(name)?;

    buffer.reserve(header_size(name, dims.len()).saturating_add(reserve));
    buffer.put_u8(data_type.as_byte());
    buffer.put_string(name)?;
    let length_slot = buffer.position();
    buffer.put_u32(payload_len);
    buffer.put_u32(dims.len() as u32);
    for &dim in dims {
        buffer.put_u32(dim);
    }
    Ok(length_slot)
}

/// Reads the header at the cursor, leaving the cursor on the first payload byte.
///
/// Fails with [`Error::CorruptHeader`] on an unknown type tag and with a buffer
/// underrun when fewer than `payload_len` bytes follow the header.
pub fn get_field_header(buffer: &mut IoBuffer) -> Result<FieldHeader> {
    let header_start = buffer.position();

    let tag = buffer.get_u8()?;
    let data_type = DataType::from_byte(tag).ok_or(Error::CorruptHeader {
        tag,
        position: header_start,
    })?;
    let name = buffer.get_string()?;
    let payload_len = buffer.get_u32()?;

    let dim_count = buffer.get_u32()? as usize;
    if dim_count > MAX_DIMENSIONS {
        return Err(Error::TooManyDimensions {
            count: dim_count,
            max: MAX_DIMENSIONS,
            position: header_start,
        });
    }
    let mut dims = Dims::with_capacity(dim_count);
    for _ in 0..dim_count {
        dims.push(buffer.get_u32()?);
    }

    let data_start = buffer.position();
    buffer.ensure_remaining(payload_len as usize)?;

    Ok(FieldHeader {
        data_type,
        name,
        payload_len,
        dims,
        header_start,
        data_start,
    })
}

/// Reads the header at the cursor, which must carry `expected`.
///
/// On [`Error::TypeMismatch`] the cursor is moved back to the start of the
/// header, so the caller can still [`skip`] the field.
pub fn get_typed_header(buffer: &mut IoBuffer, expected: DataType) -> Result<FieldHeader> {
    let header = get_field_header(buffer)?;
    if let Err(error) = header.expect_type(expected) {
        buffer.seek(header.header_start)?;
        return Err(error);
    }
    Ok(header)
}

pub fn put_start_marker(buffer: &mut IoBuffer, name: &str) -> Result<()> {
    put_marker(buffer, name, DataType::StartMarker)
}

pub fn put_end_marker(buffer: &mut IoBuffer, name: &str) -> Result<()> {
    put_marker(buffer, name, DataType::EndMarker)
}

fn put_marker(buffer: &mut IoBuffer, name: &str, marker: DataType) -> Result<()> {
    put_field_header(buffer, name, marker, MARKER_PAYLOAD_LEN as usize, &[])?;
    buffer.put_u8(marker.as_byte());
    Ok(())
}

/// Reads a header and its marker byte, failing with
/// [`Error::CorruptStartMarker`] unless both denote a start marker.
pub fn get_start_marker(buffer: &mut IoBuffer) -> Result<FieldHeader> {
    let header = get_field_header(buffer)?;
    check_start_marker(buffer, &header)?;
    Ok(header)
}

/// Reads a header and its marker byte, failing with
/// [`Error::CorruptEndMarker`] unless both denote an end marker.
pub fn get_end_marker(buffer: &mut IoBuffer) -> Result<FieldHeader> {
    let header = get_field_header(buffer)?;
    check_end_marker(buffer, &header)?;
    Ok(header)
}

/// Validates an already decoded header as a start marker and consumes its payload.
pub fn check_start_marker(buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
    let corrupt = |found, position| Error::CorruptStartMarker { found, position };
    check_marker(buffer, header, DataType::StartMarker, corrupt)
}

/// Validates an already decoded header as an end marker and consumes its payload.
pub fn check_end_marker(buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
    let corrupt = |found, position| Error::CorruptEndMarker { found, position };
    check_marker(buffer, header, DataType::EndMarker, corrupt)
}

fn check_marker(
    buffer: &mut IoBuffer,
    header: &FieldHeader,
    marker: DataType,
    corrupt: impl Fn(u8, usize) -> Error,
) -> Result<()> {
    if header.data_type != marker || header.payload_len != MARKER_PAYLOAD_LEN {
        return Err(corrupt(header.data_type.as_byte(), header.header_start));
    }
    let position = buffer.position();
    let byte = buffer.get_u8()?;
    if byte != marker.as_byte() {
        return Err(corrupt(byte, position));
    }
    Ok(())
}

/// Reads the header at the cursor and skips the field it describes.
///
/// Returns the skipped header.
pub fn skip(buffer: &mut IoBuffer) -> Result<FieldHeader> {
    let header = get_field_header(buffer)?;
    skip_field(buffer, &header)?;
    Ok(header)
}

/// Skips the payload of an already decoded header.
///
/// Plain fields jump straight to [`FieldHeader::data_end`]. A start marker
/// opens a nested sequence, which is skipped field by field up to and
/// including its matching end marker.
pub fn skip_field(buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
    trace!(
        "skip '{}' ({}, {} bytes) at {}",
        header.name,
        header.data_type,
        header.payload_len,
        header.header_start
    );
    buffer.seek(header.data_end())?;
    if header.data_type == DataType::StartMarker {
        loop {
            let nested = get_field_header(buffer)?;
            if nested.data_type == DataType::EndMarker {
                return check_end_marker(buffer, &nested);
            }
            skip_field(buffer, &nested)?;
        }
    }
    Ok(())
}
