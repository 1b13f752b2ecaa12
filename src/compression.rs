//! Raw deflate compression for secret payloads.
//!
//! The stream carries no zlib or gzip container, only the bare deflate bits,
//! so not a single embedding slot is wasted on framing.

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::result::Result;

/// Compress a byte stream with the deflate algorithm at best compression.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Uncompress a byte stream compressed with [`deflate`].
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut inflated = Vec::new();
    DeflateDecoder::new(data).read_to_end(&mut inflated)?;
    Ok(inflated)
}
