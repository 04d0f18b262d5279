//! Error taxonomy for compression runs
//!
//! Every failure is terminal for the run that produced it. The variants map
//! one-to-one onto the stage that failed so callers can tell an unopenable
//! path apart from a sink that filled up halfway through.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of a run a path belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamRole {
    /// The uncompressed input
    Source,
    /// The compressed output
    Sink,
}

impl fmt::Display for StreamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamRole::Source => f.write_str("source"),
            StreamRole::Sink => f.write_str("sink"),
        }
    }
}

/// Failures raised by the deflate codec itself
#[derive(Debug, Error)]
pub enum CodecError {
    /// zlib only defines levels 0 through 9
    #[error("compression level {0} is out of range (0-9)")]
    InvalidLevel(u32),

    #[error("deflate stream error: {0}")]
    Stream(#[from] flate2::CompressError),

    /// The codec state was used after it had been released
    #[error("codec state used after finalization")]
    Finalized,

    /// A step with input pending, or a finishing step, consumed nothing,
    /// produced nothing and did not end the stream
    #[error("codec made no progress on pending work")]
    Stalled,
}

/// Result of a failed compression or decompression run
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("failed to open {role} `{}`: {source}", .path.display())]
    IoOpen {
        role: StreamRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize codec: {0}")]
    CodecInit(#[source] CodecError),

    #[error("failed to read input: {0}")]
    IoRead(#[source] io::Error),

    #[error("failed to write output: {0}")]
    IoWrite(#[source] io::Error),

    #[error("codec failed mid-stream: {0}")]
    Codec(#[source] CodecError),

    #[error("compressed input is not a valid zlib stream: {0}")]
    CorruptStream(#[source] io::Error),
}

/// Fieldless view of [`CompressError`] for matching and exit-code mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    IoOpen,
    CodecInit,
    IoRead,
    IoWrite,
    Codec,
    CorruptStream,
}

impl CompressError {
    /// Which stage of the run failed
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompressError::IoOpen { .. } => ErrorKind::IoOpen,
            CompressError::CodecInit(_) => ErrorKind::CodecInit,
            CompressError::IoRead(_) => ErrorKind::IoRead,
            CompressError::IoWrite(_) => ErrorKind::IoWrite,
            CompressError::Codec(_) => ErrorKind::Codec,
            CompressError::CorruptStream(_) => ErrorKind::CorruptStream,
        }
    }

    pub(crate) fn open(role: StreamRole, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CompressError::IoOpen {
            role,
            path: path.into(),
            source,
        }
    }
}

impl From<CompressError> for io::Error {
    fn from(err: CompressError) -> Self {
        match err {
            CompressError::IoOpen { source, .. }
            | CompressError::IoRead(source)
            | CompressError::IoWrite(source) => source,
            CompressError::CorruptStream(source) => {
                io::Error::new(io::ErrorKind::InvalidData, source)
            }
            other => io::Error::other(other),
        }
    }
}
