//! Engine configuration
//!
//! Chunk size and compression level are fixed when an [`Engine`] is built and
//! apply to every run it performs. There is no per-call override.
//!
//! ```rust
//! use chunkflate::{CompressionLevel, EngineConfig};
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.chunk_size(), 16 * 1024);
//! assert_eq!(config.level().to_zlib_level(), 6);
//!
//! // Tiny chunks make boundary conditions cheap to exercise in tests
//! let small = EngineConfig::default()
//!     .with_chunk_size(64)
//!     .with_level(CompressionLevel::Best);
//! assert_eq!(small.chunk_size(), 64);
//! ```
//!
//! [`Engine`]: super::engine::Engine

/// Default size of both the input and the output buffer (16KB)
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Smallest chunk size accepted; smaller requests are rounded up
pub const MIN_CHUNK_SIZE: usize = 16;

/// Compression level for the deflate codec
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompressionLevel {
    /// zlib level 1
    Fast,
    /// zlib level 6, what `Z_DEFAULT_COMPRESSION` resolves to
    #[default]
    Default,
    /// zlib level 9
    Best,
    /// Raw zlib level; anything above 9 is rejected when the codec is created
    Custom(u32),
}

impl CompressionLevel {
    /// Convert to a numeric zlib level
    pub fn to_zlib_level(self) -> u32 {
        match self {
            CompressionLevel::Fast => 1,
            CompressionLevel::Default => 6,
            CompressionLevel::Best => 9,
            CompressionLevel::Custom(level) => level,
        }
    }
}

/// Fixed parameters of a compression [`Engine`](super::engine::Engine)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    chunk_size: usize,
    level: CompressionLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            level: CompressionLevel::Default,
        }
    }
}

impl EngineConfig {
    /// Set the input/output buffer capacity (clamped to [`MIN_CHUNK_SIZE`])
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(MIN_CHUNK_SIZE);
        self
    }

    /// Set the compression level
    pub fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }
}
