//! # chunkflate
//!
//! Single-pass chunked zlib compression from one byte stream to another.
//!
//! A run reads its source in fixed-size chunks, feeds each chunk to a
//! stateful deflate codec, and writes the compressed output as it is
//! produced, so memory use does not depend on the input size.

pub mod io;
pub use io::*;
