use std::io::{Read, Write};

use flate2::Compression;
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::IoContext;
use crate::{Error, Result};

/// Compresses `bytes` using a zlib encoder.
///
/// # Errors
///
/// This function will fail if the `ZlibEncoder` fails.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .io_context("failed to write to encoder when compressing data")?;
    encoder.finish().io_context("could not finalize compression")
}

/// Returns `bytes` decompressed, using a zlib decoder.
///
/// # Errors
///
/// Any failure reading the stream means the stored bytes are not valid zlib, so it is reported as
/// `CorruptData`.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut decoder = ZlibDecoder::new(bytes);
    decoder
        .read_to_end(&mut buf)
        .map_err(|e| Error::CorruptData(format!("could not decompress data: {}", e)))?;

    Ok(buf)
}
