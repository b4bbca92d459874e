use log::trace;
use rawbuf::IoBuffer;

use crate::{DataType, Error, Result, header::put_field_header_reserving};

/// Upper bound on the bytes reserved up front for a sized block's estimate.
pub const MAX_ESTIMATE_RESERVE: usize = 1 << 20;

/// Pending payload length of a header written before its payload size was known.
///
/// Created by [`begin_sized_block`] and consumed by [`end_sized_block`], which
/// overwrites the speculative length with the number of bytes actually
/// written. The token cannot be cloned, so each block is patched at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "A SizePatch must be resolved with end_sized_block"]
pub struct SizePatch {
    /// Offset of the fixed-width payload length slot.
    length_slot: usize,
    /// Offset of the first payload byte.
    data_start: usize,
    /// Length written into the slot by `begin_sized_block`.
    estimate: usize,
}

impl SizePatch {
    #[inline(always)]
    pub fn length_slot(&self) -> usize {
        self.length_slot
    }

    #[inline(always)]
    pub fn data_start(&self) -> usize {
        self.data_start
    }

    #[inline(always)]
    pub fn estimate(&self) -> usize {
        self.estimate
    }
}

/// Writes a field header whose payload length is not known yet.
///
/// `estimate` only pre-sizes the buffer, by at most [`MAX_ESTIMATE_RESERVE`]
/// bytes. The slot is rewritten by [`end_sized_block`] and nothing reads the
/// estimated value.
pub fn begin_sized_block(
    buffer: &mut IoBuffer,
    name: &str,
    data_type: DataType,
    dims: &[u32],
    estimate: usize,
) -> Result<SizePatch> {
    let estimate = estimate.min(u32::MAX as usize);
    let length_slot = put_field_header_reserving(
        buffer,
        name,
        data_type,
        estimate,
        dims,
        estimate.min(MAX_ESTIMATE_RESERVE),
    )?;
    Ok(SizePatch {
        length_slot,
        data_start: buffer.position(),
        estimate,
    })
}

/// Patches the length slot of `patch` with the bytes written since its header.
///
/// The cursor is left at the end of the block and the buffer length is
/// unchanged. Returns the patched length.
pub fn end_sized_block(buffer: &mut IoBuffer, patch: SizePatch) -> Result<u32> {
    let position = buffer.position();
    if position < patch.data_start {
        return Err(Error::PatchOutOfOrder {
            data_start: patch.data_start,
            position,
        });
    }
    let len = position - patch.data_start;
    let len = u32::try_from(len).map_err(|_| Error::PayloadTooLarge { len })?;

    buffer.seek(patch.length_slot)?;
    buffer.put_u32(len);
    buffer.seek(position)?;

    trace!(
        "size patch at {}: estimate {} -> {len} bytes",
        patch.length_slot, patch.estimate
    );
    Ok(len)
}
