use rawbuf::IoBuffer;

use crate::{
    DataType, Dims, Error, FieldHeader, Primitive, Result, get_typed_header, put_field_header,
};

/// Dense n-dimensional array stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiArray<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T> Default for MultiArray<T> {
    fn default() -> Self {
        Self {
            dims: Dims::from_slice(&[0]),
            data: Vec::new(),
        }
    }
}

impl<T> MultiArray<T> {
    /// Creates an array of shape `dims` over `data`.
    ///
    /// Fails with [`Error::ShapeMismatch`] unless `data` holds exactly
    /// `product(dims)` elements.
    pub fn new(dims: &[u32], data: Vec<T>) -> Result<Self> {
        let expected = checked_element_count(dims);
        if expected != Some(data.len()) {
            return Err(Error::ShapeMismatch {
                dims: dims.to_vec(),
                len: data.len(),
            });
        }
        Ok(Self {
            dims: Dims::from_slice(dims),
            data,
        })
    }

    /// One-dimensional array over `data`.
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        let dims = vec_dims(data.len())?;
        Self::new(&dims, data)
    }

    #[inline(always)]
    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    #[inline(always)]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    #[inline(always)]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at the multi-dimensional `index`, `None` when out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.offset(index).and_then(|offset| self.data.get(offset))
    }

    fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.dims.len() {
            return None;
        }
        index
            .iter()
            .zip(self.dims.iter())
            .try_fold(0usize, |offset, (&i, &dim)| {
                (i < dim as usize).then(|| offset * dim as usize + i)
            })
    }
}

fn checked_element_count(dims: &[u32]) -> Option<usize> {
    dims.iter()
        .try_fold(1usize, |count, &dim| count.checked_mul(dim as usize))
}

fn array_payload_len(header: &FieldHeader, element_size: usize) -> Result<usize> {
    checked_element_count(header.dims())
        .and_then(|count| count.checked_mul(element_size))
        .filter(|&len| len == header.payload_len())
        .ok_or_else(|| Error::CorruptPayload {
            field: header.name().to_owned(),
            declared: header.payload_len(),
            actual: header.element_count().saturating_mul(element_size),
        })
}

fn vec_dims(len: usize) -> Result<[u32; 1]> {
    u32::try_from(len)
        .map(|len| [len])
        .map_err(|_| Error::PayloadTooLarge { len })
}

/// Writes `values` as an array of shape `dims`.
pub fn put_array<T: Primitive>(
    buffer: &mut IoBuffer,
    name: &str,
    values: &[T],
    dims: &[u32],
) -> Result<()> {
    if checked_element_count(dims) != Some(values.len()) {
        return Err(Error::ShapeMismatch {
            dims: dims.to_vec(),
            len: values.len(),
        });
    }
    put_field_header(buffer, name, T::ARRAY_TYPE, values.len() * T::SIZE, dims)?;
    values.iter().for_each(|&value| T::put(buffer, value));
    Ok(())
}

/// Writes `values` as a one-dimensional array.
pub fn put_vec<T: Primitive>(buffer: &mut IoBuffer, name: &str, values: &[T]) -> Result<()> {
    put_array(buffer, name, values, &vec_dims(values.len())?)
}

pub fn put_multi_array<T: Primitive>(
    buffer: &mut IoBuffer,
    name: &str,
    array: &MultiArray<T>,
) -> Result<()> {
    put_array(buffer, name, array.data(), array.dims())
}

/// Reads the next field, which must be an array of `T`, flattened.
///
/// On a type mismatch the cursor stays on the header (see [`get_typed_header`]).
pub fn get_vec<T: Primitive>(buffer: &mut IoBuffer) -> Result<Vec<T>> {
    let header = get_typed_header(buffer, T::ARRAY_TYPE)?;
    let mut values = Vec::new();
    read_array_into(buffer, &header, &mut values)?;
    Ok(values)
}

/// Reads the next field, which must be an array of `T`, keeping its shape.
pub fn get_multi_array<T: Primitive>(buffer: &mut IoBuffer) -> Result<MultiArray<T>> {
    let header = get_typed_header(buffer, T::ARRAY_TYPE)?;
    read_multi_array(buffer, &header)
}

/// Reads the payload of an array field into `values`, replacing its content.
///
/// Fails with [`Error::CorruptPayload`] when the declared payload length is not
/// `product(dims) × size_of::<T>()`.
pub fn read_array_into<T: Primitive>(
    buffer: &mut IoBuffer,
    header: &FieldHeader,
    values: &mut Vec<T>,
) -> Result<()> {
    header.expect_type(T::ARRAY_TYPE)?;
    let count = array_payload_len(header, T::SIZE)? / T::SIZE;
    values.clear();
    values.reserve(count);
    for _ in 0..count {
        values.push(T::get(buffer)?);
    }
    Ok(())
}

pub fn read_multi_array<T: Primitive>(
    buffer: &mut IoBuffer,
    header: &FieldHeader,
) -> Result<MultiArray<T>> {
    let mut data = Vec::new();
    read_array_into(buffer, header, &mut data)?;
    MultiArray::new(header.dims(), data)
}

/// Writes `values` as a string array of shape `dims`.
///
/// Nothing is written when any element is too long.
pub fn put_string_array(
    buffer: &mut IoBuffer,
    name: &str,
    values: &[String],
    dims: &[u32],
) -> Result<()> {
    if checked_element_count(dims) != Some(values.len()) {
        return Err(Error::ShapeMismatch {
            dims: dims.to_vec(),
            len: values.len(),
        });
    }
    for value in values {
        buffer.check_string_len(value)?;
    }
    let payload_len = values.iter().map(|v| IoBuffer::string_size(v)).sum();
    put_field_header(buffer, name, DataType::StringArray, payload_len, dims)?;
    for value in values {
        buffer.put_string(value)?;
    }
    Ok(())
}

pub fn put_string_vec(buffer: &mut IoBuffer, name: &str, values: &[String]) -> Result<()> {
    put_string_array(buffer, name, values, &vec_dims(values.len())?)
}

/// Reads the payload of a string array field into `values`, replacing its content.
///
/// The strings must fill exactly the declared payload length.
pub fn read_string_array_into(
    buffer: &mut IoBuffer,
    header: &FieldHeader,
    values: &mut Vec<String>,
) -> Result<()> {
    header.expect_type(DataType::StringArray)?;
    let count = header.element_count();
    values.clear();
    for _ in 0..count {
        if buffer.position() >= header.data_end() {
            break;
        }
        values.push(buffer.get_string()?);
    }
    let actual = buffer.position() - header.data_start();
    if values.len() != count || actual != header.payload_len() {
        return Err(Error::CorruptPayload {
            field: header.name().to_owned(),
            declared: header.payload_len(),
            actual,
        });
    }
    Ok(())
}
