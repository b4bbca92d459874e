use rawbuf::IoBuffer;

use crate::{
    DataType, FieldHeader, MultiArray, Primitive, Record, Result, put, put_list, put_multi_array,
    put_string, put_string_vec, put_vec, read_array_into, read_list_into, read_multi_array,
    read_scalar, read_string, read_string_array_into,
};

/// Value that can be stored as a single named field of a [`Record`].
///
/// `read_field` is handed a header whose name already matched; it must check
/// the type tag and consume exactly the payload.
pub trait FieldValue {
    /// Type tag written for this value.
    const DATA_TYPE: DataType;

    fn write_field(&self, buffer: &mut IoBuffer, name: &str) -> Result<()>;

    fn read_field(&mut self, buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()>;
}

macro_rules! impl_field_value_for_primitive {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                const DATA_TYPE: DataType = <$t as Primitive>::DATA_TYPE;

                #[inline]
                fn write_field(&self, buffer: &mut IoBuffer, name: &str) -> Result<()> {
                    put(buffer, name, *self)
                }

                #[inline]
                fn read_field(&mut self, buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
                    *self = read_scalar(buffer, header)?;
                    Ok(())
                }
            }

            impl FieldValue for Vec<$t> {
                const DATA_TYPE: DataType = <$t as Primitive>::ARRAY_TYPE;

                #[inline]
                fn write_field(&self, buffer: &mut IoBuffer, name: &str) -> Result<()> {
                    put_vec(buffer, name, self)
                }

                #[inline]
                fn read_field(&mut self, buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
                    read_array_into(buffer, header, self)
                }
            }
        )*
    };
}

impl_field_value_for_primitive!(bool, i8, i16, i32, i64, f32, f64);

impl FieldValue for String {
    const DATA_TYPE: DataType = DataType::String;

    fn write_field(&self, buffer: &mut IoBuffer, name: &str) -> Result<()> {
        put_string(buffer, name, self)
    }

    fn read_field(&mut self, buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
        *self = read_string(buffer, header)?;
        Ok(())
    }
}

impl FieldValue for Vec<String> {
    const DATA_TYPE: DataType = DataType::StringArray;

    fn write_field(&self, buffer: &mut IoBuffer, name: &str) -> Result<()> {
        put_string_vec(buffer, name, self)
    }

    fn read_field(&mut self, buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
        read_string_array_into(buffer, header, self)
    }
}

impl<T: Primitive> FieldValue for MultiArray<T> {
    const DATA_TYPE: DataType = T::ARRAY_TYPE;

    fn write_field(&self, buffer: &mut IoBuffer, name: &str) -> Result<()> {
        put_multi_array(buffer, name, self)
    }

    fn read_field(&mut self, buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
        *self = read_multi_array(buffer, header)?;
        Ok(())
    }
}

/// Collections of records are written as a size-patched list.
impl<R: Record> FieldValue for Vec<R> {
    const DATA_TYPE: DataType = DataType::List;

    fn write_field(&self, buffer: &mut IoBuffer, name: &str) -> Result<()> {
        put_list(buffer, name, self).map(|_| ())
    }

    fn read_field(&mut self, buffer: &mut IoBuffer, header: &FieldHeader) -> Result<()> {
        read_list_into(buffer, header, self)
    }
}
