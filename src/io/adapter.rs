//! Byte source and sink handles over the filesystem
//!
//! The adapter opens the uncompressed source read-only and the compressed
//! sink write-only (created or truncated). Both handles are plain blocking
//! file wrappers with no shared state; the engine only needs [`Read`] and
//! [`Write`] from them.
//!
//! # Examples
//! ```no_run
//! use chunkflate::{open, Engine};
//!
//! let (mut source, mut sink) = open("image.png", "image.png.z").unwrap();
//! Engine::default().compress(&mut source, &mut sink).unwrap();
//! sink.close().unwrap();
//! source.close();
//! ```

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use super::error::{CompressError, StreamRole};

/// Read-only handle on the uncompressed input
#[derive(Debug)]
pub struct SourceHandle {
    file: File,
}

impl SourceHandle {
    /// Open `path` for reading
    ///
    /// # Errors
    /// Returns [`CompressError::IoOpen`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CompressError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CompressError::open(StreamRole::Source, path, e))?;
        Ok(Self { file })
    }

    /// Size of the source in bytes
    ///
    /// # Errors
    /// Returns [`CompressError::IoRead`] if the file metadata cannot be read.
    pub fn len(&self) -> Result<u64, CompressError> {
        Ok(self.file.metadata().map_err(CompressError::IoRead)?.len())
    }

    /// Whether the source holds no bytes
    pub fn is_empty(&self) -> Result<bool, CompressError> {
        Ok(self.len()? == 0)
    }

    /// Close the handle
    pub fn close(self) {
        drop(self.file);
    }
}

impl Read for SourceHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// Write-only handle on the compressed output
#[derive(Debug)]
pub struct SinkHandle {
    file: File,
}

impl SinkHandle {
    /// Create or truncate `path` for writing
    ///
    /// The file exists on disk, empty, as soon as this returns.
    ///
    /// # Errors
    /// Returns [`CompressError::IoOpen`] if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, CompressError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| CompressError::open(StreamRole::Sink, path, e))?;
        Ok(Self { file })
    }

    /// Flush written data to disk and close the handle
    ///
    /// # Errors
    /// Returns [`CompressError::IoWrite`] if the data cannot be persisted.
    pub fn close(mut self) -> Result<(), CompressError> {
        self.file.flush().map_err(CompressError::IoWrite)?;
        self.file.sync_all().map_err(CompressError::IoWrite)
    }
}

impl Write for SinkHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Open the source for reading and the sink for writing
///
/// The source is opened first, so a missing or unreadable source never
/// touches the sink path.
///
/// # Errors
/// Returns [`CompressError::IoOpen`] naming whichever side failed.
pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
    source_path: P,
    sink_path: Q,
) -> Result<(SourceHandle, SinkHandle), CompressError> {
    let source = SourceHandle::open(source_path)?;
    let sink = SinkHandle::create(sink_path)?;
    Ok((source, sink))
}
