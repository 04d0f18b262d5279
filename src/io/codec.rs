//! Stateful deflate codec and its scope-bound owner
//!
//! [`Codec`] is the seam between the chunk pump and the compression
//! algorithm: one call to [`Codec::step`] moves as many bytes as fit from an
//! input slice into an output slice, and [`Codec::finalize`] releases the
//! codec's internal state. [`ZlibCodec`] is the production implementation on
//! top of `flate2::Compress` with a zlib header and Adler-32 trailer.
//!
//! [`CodecGuard`] owns a codec for the duration of one run and finalizes it
//! exactly once when dropped, whichever way the run ends.

use std::ops::{Deref, DerefMut};

use flate2::{Compress, Compression, FlushCompress, Status};

use super::config::EngineConfig;
use super::error::CodecError;

/// How much the codec must flush on a step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flush {
    /// More input follows; buffer freely
    None,
    /// Input is exhausted; emit everything and terminate the stream
    Finish,
}

/// Outcome of a single codec step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// Bytes taken from the front of the input slice
    pub consumed: usize,
    /// Bytes written to the front of the output slice
    pub produced: usize,
    /// The codec has written its stream terminator
    pub stream_end: bool,
}

/// A stateful, incremental compressor
pub trait Codec {
    /// Compress from `input` into `output`
    ///
    /// # Errors
    /// Returns [`CodecError::Finalized`] if called after [`Codec::finalize`],
    /// or the underlying stream error.
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Result<Step, CodecError>;

    /// Release the codec's internal state
    ///
    /// After this call every `step` fails. Calling it again is a no-op.
    fn finalize(&mut self);
}

/// zlib-wrapped deflate backed by `flate2`
pub struct ZlibCodec {
    inner: Option<Compress>,
}

impl ZlibCodec {
    /// Create codec state at the configured level
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidLevel`] for levels above 9.
    pub fn new(config: &EngineConfig) -> Result<Self, CodecError> {
        let level = config.level().to_zlib_level();
        if level > 9 {
            return Err(CodecError::InvalidLevel(level));
        }
        Ok(Self {
            inner: Some(Compress::new(Compression::new(level), true)),
        })
    }

    /// Whether the codec still holds live state
    pub fn is_live(&self) -> bool {
        self.inner.is_some()
    }
}

impl Codec for ZlibCodec {
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Result<Step, CodecError> {
        let compress = self.inner.as_mut().ok_or(CodecError::Finalized)?;
        let flush = match flush {
            Flush::None => FlushCompress::None,
            Flush::Finish => FlushCompress::Finish,
        };

        let before_in = compress.total_in();
        let before_out = compress.total_out();
        let status = compress.compress(input, output, flush)?;

        Ok(Step {
            consumed: (compress.total_in() - before_in) as usize,
            produced: (compress.total_out() - before_out) as usize,
            stream_end: status == Status::StreamEnd,
        })
    }

    fn finalize(&mut self) {
        self.inner = None;
    }
}

/// Owns a codec and finalizes it exactly once on drop
pub struct CodecGuard<C: Codec> {
    codec: C,
    finalized: bool,
}

impl<C: Codec> CodecGuard<C> {
    /// Take ownership of freshly initialized codec state
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            finalized: false,
        }
    }

    /// Finalize now instead of at end of scope
    pub fn finalize(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.finalized {
            self.finalized = true;
            self.codec.finalize();
        }
    }
}

impl<C: Codec> Deref for CodecGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.codec
    }
}

impl<C: Codec> DerefMut for CodecGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.codec
    }
}

impl<C: Codec> Drop for CodecGuard<C> {
    fn drop(&mut self) {
        self.release();
    }
}
