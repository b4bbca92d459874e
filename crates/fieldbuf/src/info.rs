use log::debug;
use rawbuf::IoBuffer;

use crate::{
    DataType, Error, Field, FieldHeader, Record, Result, Version, WIRE_VERSION, decode, encode,
    put, read_scalar, record_field,
};

/// Stream preamble identifying the producer and the layout version.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub producer: String,
    pub version: Version,
}

impl Record for StreamInfo {
    const TYPE_NAME: &'static str = "StreamInfo";
    const FIELDS: &'static [Field<Self>] = &[
        record_field!(StreamInfo, "producer", producer: String),
        Field::new(
            "version",
            DataType::Int,
            |info: &Self, buffer: &mut IoBuffer, name: &str| {
                put(buffer, name, u32::from(info.version) as i32)
            },
            |info: &mut Self, buffer: &mut IoBuffer, header: &FieldHeader| {
                info.version = Version::new(read_scalar::<i32>(buffer, header)? as u32);
                Ok(())
            },
        ),
    ];
}

/// Writes the preamble for a stream produced by `producer`.
pub fn put_header_info(buffer: &mut IoBuffer, producer: &str) -> Result<()> {
    encode(
        buffer,
        &StreamInfo {
            producer: producer.to_owned(),
            version: WIRE_VERSION,
        },
    )
}

/// Reads the preamble, failing with [`Error::DifferentVersion`] unless the
/// stream was written with [`WIRE_VERSION`].
pub fn get_header_info(buffer: &mut IoBuffer) -> Result<StreamInfo> {
    let info: StreamInfo = decode(buffer)?;
    if info.version != WIRE_VERSION {
        return Err(Error::DifferentVersion {
            found: info.version,
            expected: WIRE_VERSION,
        });
    }
    debug!("Stream written by '{}' ({})", info.producer, info.version);
    Ok(info)
}
