use rawbuf::{BufferOptions, IoBuffer};
use rayon::prelude::*;

use crate::{Record, Result, decode, encode};

/// Encodes each record into its own buffer, in parallel.
///
/// The output keeps the order of `records`.
pub fn encode_batch<R>(records: &[R], options: &BufferOptions) -> Result<Vec<Vec<u8>>>
where
    R: Record + Sync,
{
    records
        .par_iter()
        .map(|record| {
            let mut buffer = IoBuffer::with_options(*options);
            encode(&mut buffer, record)?;
            Ok(buffer.into_bytes())
        })
        .collect()
}

/// Decodes one record from each payload, in parallel.
///
/// Fails if any payload is malformed.
pub fn decode_batch<R>(payloads: Vec<Vec<u8>>, options: &BufferOptions) -> Result<Vec<R>>
where
    R: Record + Send,
{
    payloads
        .into_par_iter()
        .map(|bytes| {
            let mut buffer = IoBuffer::from_bytes_with(bytes, *options);
            decode(&mut buffer)
        })
        .collect()
}
