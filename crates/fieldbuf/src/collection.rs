use log::debug;
use rawbuf::IoBuffer;

use crate::{
    DataType, Error, FieldHeader, Record, Result, begin_sized_block, decode_fields, encode_nested,
    end_sized_block, get_start_marker, get_typed_header, record::write_or_rollback,
};

/// Default average size of one list entry in bytes.
pub const DEFAULT_ENTRY_SIZE_ESTIMATE: usize = 50;

/// Bytes a list payload needs besides its entries.
pub const LIST_OVERHEAD_ESTIMATE: usize = 9;

/// Smallest possible bracketed entry: an empty start and end marker pair.
const MIN_ENTRY_SIZE: usize = 2 * (1 + 4 + 4 + 4 + 1);

/// Capacity hint for a list of `count` entries of about `entry_size` bytes.
#[inline]
pub fn estimate_list_size(count: usize, entry_size: usize) -> usize {
    count
        .saturating_mul(entry_size)
        .saturating_add(LIST_OVERHEAD_ESTIMATE)
}

/// Writes `records` as a list field.
///
/// The payload is the element count followed by each record between start
/// and end markers named after [`Record::element_name`]. The header length is
/// patched once every entry is written. Returns the patched payload length.
/// When appending, a failed write leaves the buffer as it was.
pub fn put_list<R: Record>(buffer: &mut IoBuffer, name: &str, records: &[R]) -> Result<u32> {
    let count =
        u32::try_from(records.len()).map_err(|_| Error::PayloadTooLarge { len: records.len() })?;
    let estimate = estimate_list_size(records.len(), R::ENTRY_SIZE_ESTIMATE);

    let len = write_or_rollback(buffer, |buffer| {
        let patch = begin_sized_block(buffer, name, DataType::List, &[count], estimate)?;
        buffer.put_u32(count);
        for record in records {
            encode_nested(buffer, record.element_name(), record)?;
        }
        end_sized_block(buffer, patch)
    })?;

    debug!(
        "Wrote list '{name}': {count} {} entries, {len} bytes",
        R::TYPE_NAME
    );
    Ok(len)
}

/// Reads the next field, which must be a list of `R`.
///
/// On a type mismatch the cursor stays on the header (see [`get_typed_header`]).
pub fn get_list<R: Record>(buffer: &mut IoBuffer) -> Result<Vec<R>> {
    let header = get_typed_header(buffer, DataType::List)?;
    let mut records = Vec::new();
    read_list_into(buffer, &header, &mut records)?;
    Ok(records)
}

/// Reads the payload of a list field into `records`, replacing its content.
///
/// Exactly as many bracketed entries as the stored count are consumed, and
/// they must fill the declared payload length.
pub fn read_list_into<R: Record>(
    buffer: &mut IoBuffer,
    header: &FieldHeader,
    records: &mut Vec<R>,
) -> Result<()> {
    header.expect_type(DataType::List)?;
    records.clear();

    let count = buffer.get_u32()? as usize;
    if header.dims().len() != 1 || header.element_count() != count {
        return Err(Error::CorruptPayload {
            field: header.name().to_owned(),
            declared: header.element_count(),
            actual: count,
        });
    }

    records.reserve(count.min(header.payload_len() / MIN_ENTRY_SIZE));
    for _ in 0..count {
        get_start_marker(buffer)?;
        let mut record = R::default();
        decode_fields(buffer, &mut record)?;
        records.push(record);
    }

    let actual = buffer.position() - header.data_start();
    if actual != header.payload_len() {
        return Err(Error::CorruptPayload {
            field: header.name().to_owned(),
            declared: header.payload_len(),
            actual,
        });
    }

    debug!(
        "Read list '{}': {count} {} entries",
        header.name(),
        R::TYPE_NAME
    );
    Ok(())
}
