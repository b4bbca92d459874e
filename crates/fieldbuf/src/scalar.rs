use rawbuf::IoBuffer;

use crate::{DataType, Error, FieldHeader, Primitive, Result, get_typed_header, put_field_header};

/// Writes a single primitive field.
pub fn put<T: Primitive>(buffer: &mut IoBuffer, name: &str, value: T) -> Result<()> {
    put_field_header(buffer, name, T::DATA_TYPE, T::SIZE, &[])?;
    T::put(buffer, value);
    Ok(())
}

/// Reads the next field, which must be a `T` scalar.
///
/// On a type mismatch the cursor stays on the header (see [`get_typed_header`]).
pub fn get<T: Primitive>(buffer: &mut IoBuffer) -> Result<T> {
    let header = get_typed_header(buffer, T::DATA_TYPE)?;
    read_scalar(buffer, &header)
}

/// Reads the payload of a scalar field whose header was already decoded.
pub fn read_scalar<T: Primitive>(buffer: &mut IoBuffer, header: &FieldHeader) -> Result<T> {
    header.expect_type(T::DATA_TYPE)?;
    if header.payload_len() != T::SIZE {
        return Err(Error::CorruptPayload {
            field: header.name().to_owned(),
            declared: header.payload_len(),
            actual: T::SIZE,
        });
    }
    T::get(buffer)
}

/// Writes a string field. Nothing is written when `value` is too long.
pub fn put_string(buffer: &mut IoBuffer, name: &str, value: &str) -> Result<()> {
    buffer.check_string_len(value)?;
    put_field_header(
        buffer,
        name,
        DataType::String,
        IoBuffer::string_size(value),
        &[],
    )?;
    buffer.put_string(value)?;
    Ok(())
}

/// Reads the next field, which must be a string.
pub fn get_string(buffer: &mut IoBuffer) -> Result<String> {
    let header = get_typed_header(buffer, DataType::String)?;
    read_string(buffer, &header)
}

/// Reads the payload of a string field whose header was already decoded.
pub fn read_string(buffer: &mut IoBuffer, header: &FieldHeader) -> Result<String> {
    header.expect_type(DataType::String)?;
    let value = buffer.get_string()?;
    let actual = IoBuffer::string_size(&value);
    if actual != header.payload_len() {
        return Err(Error::CorruptPayload {
            field: header.name().to_owned(),
            declared: header.payload_len(),
            actual,
        });
    }
    Ok(value)
}
