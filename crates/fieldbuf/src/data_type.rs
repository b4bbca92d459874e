use std::fmt;

/// Type tag written as the first byte of every field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    // ============================================================================
    // Structure
    // ============================================================================
    /// Opens a record or a collection element. Followed by a nested field
    /// sequence closed by the matching [`DataType::EndMarker`].
    StartMarker = 0,

    // ============================================================================
    // Scalars
    // ============================================================================
    Bool = 1,
    Byte = 2,
    Short = 3,
    Int = 4,
    Long = 5,
    Float = 6,
    Double = 7,
    String = 8,

    // ============================================================================
    // Arrays (shape carried by the header dimensions, row-major)
    // ============================================================================
    BoolArray = 101,
    ByteArray = 102,
    ShortArray = 103,
    IntArray = 104,
    LongArray = 105,
    FloatArray = 106,
    DoubleArray = 107,
    StringArray = 108,

    // ============================================================================
    // Collections
    // ============================================================================
    /// Homogeneous collection of records: element count, then bracketed elements.
    List = 201,

    /// Closes the innermost open [`DataType::StartMarker`].
    EndMarker = 255,
}

impl DataType {
    #[inline(always)]
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::StartMarker | Self::EndMarker)
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        (Self::Bool.as_byte()..=Self::String.as_byte()).contains(&self.as_byte())
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        (Self::BoolArray.as_byte()..=Self::StringArray.as_byte()).contains(&self.as_byte())
    }

    /// Fixed encoded size of one value, `None` for strings, containers and markers.
    pub fn primitive_size(&self) -> Option<usize> {
        match self {
            Self::Bool | Self::BoolArray | Self::Byte | Self::ByteArray => Some(1),
            Self::Short | Self::ShortArray => Some(2),
            Self::Int | Self::IntArray | Self::Float | Self::FloatArray => Some(4),
            Self::Long | Self::LongArray | Self::Double | Self::DoubleArray => Some(8),
            _ => None,
        }
    }

    /// Array tag holding elements of this scalar type.
    pub fn array_of(&self) -> Option<Self> {
        Some(match self {
            Self::Bool => Self::BoolArray,
            Self::Byte => Self::ByteArray,
            Self::Short => Self::ShortArray,
            Self::Int => Self::IntArray,
            Self::Long => Self::LongArray,
            Self::Float => Self::FloatArray,
            Self::Double => Self::DoubleArray,
            Self::String => Self::StringArray,
            _ => return None,
        })
    }

    /// Scalar tag of the elements of this array type.
    pub fn element_type(&self) -> Option<Self> {
        Some(match self {
            Self::BoolArray => Self::Bool,
            Self::ByteArray => Self::Byte,
            Self::ShortArray => Self::Short,
            Self::IntArray => Self::Int,
            Self::LongArray => Self::Long,
            Self::FloatArray => Self::Float,
            Self::DoubleArray => Self::Double,
            Self::StringArray => Self::String,
            _ => return None,
        })
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::StartMarker,
            1 => Self::Bool,
            2 => Self::Byte,
            3 => Self::Short,
            4 => Self::Int,
            5 => Self::Long,
            6 => Self::Float,
            7 => Self::Double,
            8 => Self::String,
            101 => Self::BoolArray,
            102 => Self::ByteArray,
            103 => Self::ShortArray,
            104 => Self::IntArray,
            105 => Self::LongArray,
            106 => Self::FloatArray,
            107 => Self::DoubleArray,
            108 => Self::StringArray,
            201 => Self::List,
            255 => Self::EndMarker,
            _ => return None,
        })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartMarker => "start marker",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::BoolArray => "bool[]",
            Self::ByteArray => "byte[]",
            Self::ShortArray => "short[]",
            Self::IntArray => "int[]",
            Self::LongArray => "long[]",
            Self::FloatArray => "float[]",
            Self::DoubleArray => "double[]",
            Self::StringArray => "string[]",
            Self::List => "list",
            Self::EndMarker => "end marker",
        };
        f.write_str(name)
    }
}
