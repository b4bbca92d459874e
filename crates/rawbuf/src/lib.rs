#![doc = include_str!("../README.md")]

mod buffer;
mod byte_order;
pub mod error;
mod options;

pub use buffer::*;
pub use byte_order::*;
pub use error::*;
pub use options::*;
