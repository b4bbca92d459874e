#![doc = include_str!("../README.md")]

pub use rawbuf::{self, BufferOptions, ByteOrder, Error as BufferError, IoBuffer};

#[cfg(feature = "derive")]
pub use fieldbuf_derive::Record;

mod array;
mod axis;
mod batch;
mod collection;
mod data_type;
mod error;
mod header;
mod info;
mod patch;
mod primitive;
mod record;
mod scalar;
mod value;
mod version;

pub use array::*;
pub use axis::*;
pub use batch::*;
pub use collection::*;
pub use data_type::*;
pub use error::*;
pub use header::*;
pub use info::*;
pub use patch::*;
pub use primitive::*;
pub use record::*;
pub use scalar::*;
pub use value::*;
pub use version::*;
