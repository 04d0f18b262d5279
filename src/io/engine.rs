//! Chunked compression engine
//!
//! Pumps a byte source through a stateful deflate codec one fixed-size chunk
//! at a time and drains the codec into a byte sink until it reports the end
//! of the stream. Memory use is two buffers of `chunk_size` bytes regardless
//! of input length.
//!
//! The run is an explicit state machine:
//!
//! ```text
//! Init ──► Pumping ──► Draining ──► Done
//!            ▲            │
//!            └────────────┘
//! ```
//!
//! Any stage after `Init` can fail; the codec is owned by a [`CodecGuard`]
//! so it is finalized on every exit path, success or error.
//!
//! # Examples
//! ```no_run
//! use chunkflate::{compress_file, Engine};
//!
//! let stats = compress_file(&Engine::default(), "output.png", "output.png.z").unwrap();
//! println!("{} -> {} bytes", stats.bytes_read, stats.bytes_written);
//! ```

use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::adapter;
use super::codec::{Codec, CodecGuard, Flush, ZlibCodec};
use super::config::EngineConfig;
use super::error::{CodecError, CompressError};

/// Byte counts for a finished run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionStats {
    /// Uncompressed bytes read from the source
    pub bytes_read: u64,
    /// Compressed bytes written to the sink
    pub bytes_written: u64,
    /// Non-empty chunks pumped into the codec
    pub chunks_read: u64,
    /// Codec steps taken, including the finishing ones
    pub codec_steps: u64,
}

impl CompressionStats {
    /// Compressed size divided by uncompressed size (0.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.bytes_read == 0 {
            0.0
        } else {
            self.bytes_written as f64 / self.bytes_read as f64
        }
    }

    /// Render as a single-line JSON object
    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string(self).map_err(io::Error::other)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Pumping,
    Draining { finishing: bool },
    Done,
}

/// Compresses byte streams with a fixed [`EngineConfig`]
///
/// The engine holds no per-run state; every call to [`Engine::compress`]
/// allocates its own buffers and codec, so one engine can serve several
/// threads at once.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine whose runs all use `config`
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The fixed configuration every run uses
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compress everything `source` yields into `sink` as one zlib stream
    ///
    /// # Arguments
    /// * `source` - Uncompressed input, read until end of stream
    /// * `sink` - Destination for the compressed stream
    ///
    /// # Errors
    /// * [`CompressError::CodecInit`] if the codec cannot be created
    /// * [`CompressError::IoRead`] if reading the source fails
    /// * [`CompressError::IoWrite`] if writing the sink fails or writes short
    /// * [`CompressError::Codec`] if the codec fails mid-stream
    ///
    /// On error the sink may hold a truncated stream; it is left as-is.
    pub fn compress<R: Read, W: Write>(
        &self,
        source: R,
        sink: W,
    ) -> Result<CompressionStats, CompressError> {
        self.compress_with(source, sink, ZlibCodec::new)
    }

    /// Compress with a codec built by `init`
    ///
    /// Same contract as [`Engine::compress`]; `init` receives the engine's
    /// configuration and its error is reported as
    /// [`CompressError::CodecInit`].
    pub fn compress_with<R, W, C, F>(
        &self,
        mut source: R,
        mut sink: W,
        init: F,
    ) -> Result<CompressionStats, CompressError>
    where
        R: Read,
        W: Write,
        C: Codec,
        F: FnOnce(&EngineConfig) -> Result<C, CodecError>,
    {
        let codec = init(&self.config).map_err(CompressError::CodecInit)?;
        let mut codec = CodecGuard::new(codec);

        let result = self.pump(&mut source, &mut sink, &mut codec);
        codec.finalize();

        match &result {
            Ok(stats) => debug!(
                bytes_read = stats.bytes_read,
                bytes_written = stats.bytes_written,
                chunks = stats.chunks_read,
                "compression finished"
            ),
            Err(err) => warn!(error = %err, "compression failed"),
        }
        result
    }

    fn pump<R: Read, W: Write, C: Codec>(
        &self,
        source: &mut R,
        sink: &mut W,
        codec: &mut CodecGuard<C>,
    ) -> Result<CompressionStats, CompressError> {
        let chunk_size = self.config.chunk_size();
        let mut input = vec![0u8; chunk_size];
        let mut output = vec![0u8; chunk_size];
        let mut loaded = 0usize;
        let mut cursor = 0usize;
        let mut stats = CompressionStats::default();
        let mut state = State::Pumping;

        while state != State::Done {
            state = match state {
                State::Pumping => {
                    loaded = fill_chunk(source, &mut input).map_err(CompressError::IoRead)?;
                    cursor = 0;
                    stats.bytes_read += loaded as u64;
                    if loaded == 0 {
                        State::Draining { finishing: true }
                    } else {
                        stats.chunks_read += 1;
                        debug!(chunk = stats.chunks_read, len = loaded, "pumped chunk");
                        State::Draining { finishing: false }
                    }
                }
                State::Draining { finishing } => {
                    let flush = if finishing { Flush::Finish } else { Flush::None };
                    let step = codec
                        .step(&input[cursor..loaded], &mut output, flush)
                        .map_err(CompressError::Codec)?;
                    stats.codec_steps += 1;
                    cursor += step.consumed;
                    trace!(
                        consumed = step.consumed,
                        produced = step.produced,
                        stream_end = step.stream_end,
                        "codec step"
                    );

                    sink.write_all(&output[..step.produced])
                        .map_err(CompressError::IoWrite)?;
                    stats.bytes_written += step.produced as u64;

                    let progressed = step.consumed > 0 || step.produced > 0;
                    if step.stream_end {
                        State::Done
                    } else if !progressed && (finishing || cursor < loaded) {
                        // Work is pending but the codec did nothing with it
                        return Err(CompressError::Codec(CodecError::Stalled));
                    } else if step.produced == output.len() || cursor < loaded || finishing {
                        State::Draining { finishing }
                    } else {
                        State::Pumping
                    }
                }
                State::Done => State::Done,
            };
        }

        sink.flush().map_err(CompressError::IoWrite)?;
        Ok(stats)
    }
}

/// Read until `buf` is full or the source is exhausted
///
/// Interrupted reads are reissued; any other error is returned as-is.
fn fill_chunk<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Compress the file at `source_path` into a zlib stream at `sink_path`
///
/// Opens both paths, runs the engine, and closes both handles. The sink is
/// created (or truncated) before any data is written.
///
/// # Returns
/// Statistics for the run
///
/// # Errors
/// [`CompressError::IoOpen`] if either path cannot be opened, otherwise
/// whatever [`Engine::compress`] or closing the sink reports.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    engine: &Engine,
    source_path: P,
    sink_path: Q,
) -> Result<CompressionStats, CompressError> {
    let (mut source, mut sink) = adapter::open(source_path, sink_path)?;
    let stats = engine.compress(&mut source, &mut sink)?;
    sink.close()?;
    source.close();
    Ok(stats)
}
