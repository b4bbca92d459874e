use std::fmt;

use log::debug;
use rawbuf::IoBuffer;

use crate::{
    DEFAULT_ENTRY_SIZE_ESTIMATE, DataType, Error, FieldHeader, Result, check_end_marker,
    check_start_marker, get_field_header, get_start_marker, put_end_marker, put_start_marker,
    skip_field,
};

pub type EncodeFn<R> = fn(&R, &mut IoBuffer, &str) -> Result<()>;
pub type DecodeFn<R> = fn(&mut R, &mut IoBuffer, &FieldHeader) -> Result<()>;

/// One named entry of a record's field table.
pub struct Field<R> {
    pub name: &'static str,
    /// Tag the field is written with, checked against incoming headers.
    pub data_type: DataType,
    pub encode: EncodeFn<R>,
    pub decode: DecodeFn<R>,
}

impl<R> Field<R> {
    pub const fn new(
        name: &'static str,
        data_type: DataType,
        encode: EncodeFn<R>,
        decode: DecodeFn<R>,
    ) -> Self {
        Self {
            name,
            data_type,
            encode,
            decode,
        }
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<R> {}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .finish_non_exhaustive()
    }
}

/// Type with a static, ordered table of named fields.
///
/// Usually derived with `#[derive(Record)]` (feature `derive`). A hand-written
/// table can use [`record_field!`](crate::record_field) for plain fields.
pub trait Record: Default + 'static {
    /// Name carried by the start and end markers of a top-level record.
    const TYPE_NAME: &'static str;

    /// Fields in encoding order.
    const FIELDS: &'static [Field<Self>];

    /// Average encoded size of one entry, used to pre-size list payloads.
    const ENTRY_SIZE_ESTIMATE: usize = DEFAULT_ENTRY_SIZE_ESTIMATE;

    /// Name written on the markers around this record when it is a list element.
    fn element_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn field(name: &str) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}

/// Builds a [`Field`] entry that delegates to the [`FieldValue`](crate::FieldValue)
/// impl of a struct member.
///
/// ```
/// use fieldbuf::{Field, Record, record_field};
///
/// #[derive(Default)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// impl Record for Point {
///     const TYPE_NAME: &'static str = "Point";
///     const FIELDS: &'static [Field<Self>] = &[
///         record_field!(Point, "x", x: f64),
///         record_field!(Point, "y", y: f64),
///     ];
/// }
/// ```
#[macro_export]
macro_rules! record_field {
    ($record:ty, $name:expr, $member:ident: $value:ty) => {
        $crate::Field::<$record>::new(
            $name,
            <$value as $crate::FieldValue>::DATA_TYPE,
            |record: &$record, buffer: &mut $crate::IoBuffer, name: &str| {
                $crate::FieldValue::write_field(&record.$member, buffer, name)
            },
            |record: &mut $record, buffer: &mut $crate::IoBuffer, header: &$crate::FieldHeader| {
                $crate::FieldValue::read_field(&mut record.$member, buffer, header)
            },
        )
    };
}

/// Writes `record` as a top-level record bracketed by markers named
/// [`Record::TYPE_NAME`].
pub fn encode<R: Record>(buffer: &mut IoBuffer, record: &R) -> Result<()> {
    encode_nested(buffer, R::TYPE_NAME, record)
}

/// Writes `record` between a start and an end marker called `name`.
///
/// When appending, a failed encode leaves the buffer as it was.
pub fn encode_nested<R: Record>(buffer: &mut IoBuffer, name: &str, record: &R) -> Result<()> {
    write_or_rollback(buffer, |buffer| {
        put_start_marker(buffer, name)?;
        encode_fields(buffer, record)?;
        put_end_marker(buffer, name)
    })
}

/// Runs `write`, dropping what it appended if it fails.
pub(crate) fn write_or_rollback<T>(
    buffer: &mut IoBuffer,
    write: impl FnOnce(&mut IoBuffer) -> Result<T>,
) -> Result<T> {
    let start = buffer.position();
    let appending = start == buffer.len();
    let result = write(buffer);
    if result.is_err() && appending {
        buffer.truncate(start);
    }
    result
}

/// Writes every field of `record` in table order, without markers.
pub fn encode_fields<R: Record>(buffer: &mut IoBuffer, record: &R) -> Result<()> {
    for field in R::FIELDS {
        (field.encode)(record, buffer, field.name)?;
    }
    Ok(())
}

/// Decodes the record at the cursor into `record`.
///
/// Fields may come in any order. Fields missing from the stream keep their
/// current value and unknown names are skipped. A known name carrying another
/// tag fails with [`Error::TypeMismatch`], leaving the cursor on that field's
/// header.
pub fn decode_into<R: Record>(buffer: &mut IoBuffer, record: &mut R) -> Result<()> {
    get_start_marker(buffer)?;
    decode_fields(buffer, record)
}

/// Decodes the record at the cursor into a fresh `R::default()`.
pub fn decode<R: Record>(buffer: &mut IoBuffer) -> Result<R> {
    let mut record = R::default();
    decode_into(buffer, &mut record)?;
    Ok(record)
}

/// Decodes a nested record whose start marker header was already read.
pub fn decode_nested<R: Record>(
    buffer: &mut IoBuffer,
    header: &FieldHeader,
    record: &mut R,
) -> Result<()> {
    check_start_marker(buffer, header)?;
    decode_fields(buffer, record)
}

/// Decodes fields into `record` up to and including the closing end marker.
pub fn decode_fields<R: Record>(buffer: &mut IoBuffer, record: &mut R) -> Result<()> {
    loop {
        let header = get_field_header(buffer)?;
        if header.data_type() == DataType::EndMarker {
            return check_end_marker(buffer, &header);
        }

        let Some(field) = R::field(header.name()) else {
            debug!(
                "{}: skipping unknown field '{}' ({})",
                R::TYPE_NAME,
                header.name(),
                header.data_type()
            );
            skip_field(buffer, &header)?;
            continue;
        };

        if let Err(error) = header.expect_type(field.data_type) {
            buffer.seek(header.header_start())?;
            return Err(error);
        }
        (field.decode)(record, buffer, &header)?;

        if header.data_type() != DataType::StartMarker && buffer.position() != header.data_end() {
            return Err(Error::CorruptPayload {
                field: header.name().to_owned(),
                declared: header.payload_len(),
                actual: buffer.position().saturating_sub(header.data_start()),
            });
        }
    }
}
