use std::fmt::Debug;

use rawbuf::IoBuffer;

use crate::{DataType, Result};

/// Fixed-size value with a scalar and an array type tag.
///
/// Implemented for `bool`, `i8`, `i16`, `i32`, `i64`, `f32` and `f64`.
pub trait Primitive: Sized + Debug + Copy + Default + PartialEq + Send + Sync + 'static {
    /// Tag of a single value.
    const DATA_TYPE: DataType;
    /// Tag of an array of values.
    const ARRAY_TYPE: DataType;
    /// Encoded size in bytes.
    const SIZE: usize;

    fn put(buffer: &mut IoBuffer, value: Self);

    fn get(buffer: &mut IoBuffer) -> Result<Self>;
}

macro_rules! impl_primitive {
    ($($t:ty => $scalar:ident, $array:ident, $put:ident, $get:ident);* $(;)?) => {
        $(
            impl Primitive for $t {
                const DATA_TYPE: DataType = DataType::$scalar;
                const ARRAY_TYPE: DataType = DataType::$array;
                const SIZE: usize = size_of::<$t>();

                #[inline]
                fn put(buffer: &mut IoBuffer, value: Self) {
                    buffer.$put(value)
                }

                #[inline]
                fn get(buffer: &mut IoBuffer) -> Result<Self> {
                    Ok(buffer.$get()?)
                }
            }
        )*
    };
}

impl_primitive!(
    bool => Bool, BoolArray, put_bool, get_bool;
    i8 => Byte, ByteArray, put_i8, get_i8;
    i16 => Short, ShortArray, put_i16, get_i16;
    i32 => Int, IntArray, put_i32, get_i32;
    i64 => Long, LongArray, put_i64, get_i64;
    f32 => Float, FloatArray, put_f32, get_f32;
    f64 => Double, DoubleArray, put_f64, get_f64;
);
