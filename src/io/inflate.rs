//! Streaming decompression of zlib streams
//!
//! The inverse of the [`Engine`](super::engine::Engine): reads a compressed
//! stream in chunks and writes the inflated bytes without holding the whole
//! payload in memory.

use std::io::{self, Read, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;

use super::adapter;
use super::error::CompressError;

/// Stream-decompress a zlib stream from a reader to a writer
///
/// # Arguments
/// * `reader` - Source of compressed data
/// * `writer` - Destination for uncompressed data
/// * `chunk_size` - Size of the read buffer
///
/// # Returns
/// Total bytes written (uncompressed size)
///
/// # Errors
/// [`CompressError::CorruptStream`] if the input is not a valid zlib stream,
/// [`CompressError::IoRead`] or [`CompressError::IoWrite`] for I/O faults.
pub fn decompress<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    chunk_size: usize,
) -> Result<u64, CompressError> {
    let mut decoder = ZlibDecoder::new(reader);
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total_written = 0u64;

    loop {
        let bytes_read = match decoder.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(classify_read_error(e)),
        };
        writer
            .write_all(&buffer[..bytes_read])
            .map_err(CompressError::IoWrite)?;
        total_written += bytes_read as u64;
    }

    writer.flush().map_err(CompressError::IoWrite)?;
    Ok(total_written)
}

// flate2 reports malformed input as InvalidInput; other backends use InvalidData.
fn classify_read_error(err: io::Error) -> CompressError {
    match err.kind() {
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => CompressError::CorruptStream(err),
        _ => CompressError::IoRead(err),
    }
}

/// Stream-decompress a file to another file
///
/// # Returns
/// Tuple of (compressed_size, decompressed_size)
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
) -> Result<(u64, u64), CompressError> {
    let (mut source, mut sink) = adapter::open(input_path, output_path)?;
    let input_size = source.len()?;

    let output_size = decompress(&mut source, &mut sink, super::config::DEFAULT_CHUNK_SIZE)?;
    sink.close()?;
    source.close();

    Ok((input_size, output_size))
}
