//! lztriple - LZ77 sliding-window codec with bit-exact triple framing
//!
//! This crate provides a lossless compressor/decompressor for text and
//! raster-image byte streams. An LZ77 match finder slides a search buffer
//! over the input and emits `(offset, length, literal)` triples, which are
//! framed into a compact self-describing bitstream; an optional second
//! encoding step routes the offset and length streams through an adaptive
//! integer range coder before final bit packing.
//!
//! The persisted form of a compressed stream is one ASCII `'0'`/`'1'`
//! character per bit, reproduced bit-exactly on every encode.
//!
//! # Example - Compression
//!
//! ```
//! use lztriple::{compress_bytes, ContentType, WindowConfig};
//!
//! let data = b"aboboraeboba";
//! let config = WindowConfig::new(7, 5)?;
//! let compressed = compress_bytes(data, ContentType::Text, config, false)?;
//! assert!(compressed.iter().all(|&b| b == b'0' || b == b'1'));
//! # Ok::<(), lztriple::LztError>(())
//! ```
//!
//! # Example - Decompression
//!
//! ```
//! use lztriple::{compress_bytes, decompress_bytes, ContentType, WindowConfig};
//!
//! let data = b"aboboraeboba";
//! let config = WindowConfig::new(7, 5)?;
//! let compressed = compress_bytes(data, ContentType::Text, config, false)?;
//! let decoded = decompress_bytes(&compressed)?;
//! assert_eq!(decoded.data, data);
//! # Ok::<(), lztriple::LztError>(())
//! ```
//!
//! # Working with triples directly
//!
//! When an external entropy-coding stage owns the framing, the triple list
//! itself is the interchange format:
//!
//! ```
//! use lztriple::{decode_from_triples, generate_triples, WindowConfig};
//!
//! let config = WindowConfig::default();
//! let triples = generate_triples(b"abcabcabc", config);
//! assert_eq!(decode_from_triples(&triples)?, b"abcabcabc");
//! # Ok::<(), lztriple::LztError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod bitstream;
pub mod common;
pub mod decode;
pub mod encode;
pub mod entropy;
pub mod error;
pub mod format;

// Re-export commonly used types
pub use bitstream::{BitReader, BitWriter};
pub use common::{
    bit_width, ContentType, LztError, Result, Triple, WindowConfig,
    DEFAULT_LOOK_AHEAD_BUFFER_SIZE, DEFAULT_SEARCH_BUFFER_SIZE, MAX_BUFFER_SIZE,
};
pub use decode::{decode_from_triples, DecodedContent, DecodedFile};
pub use encode::{generate_triples, write_triples, EncoderState};
pub use format::StreamHeader;

// Convenience functions

/// Compress a byte sequence into the on-disk ASCII bit form
///
/// # Arguments
/// * `data` - The byte sequence to compress
/// * `content` - What the bytes represent (text, or an image with its
///   dimension metadata)
/// * `config` - Search and look-ahead buffer sizes
/// * `second_stage` - Route offsets and lengths through the second-stage
///   range coder
pub fn compress_bytes(
    data: &[u8],
    content: ContentType,
    config: WindowConfig,
    second_stage: bool,
) -> Result<Vec<u8>> {
    encode::compress_bytes(data, content, config, second_stage)
}

/// Decompress a stream in the on-disk ASCII bit form
///
/// Returns the reconstructed bytes together with the recovered content
/// description (image streams include their solved dimensions).
pub fn decompress_bytes(data: &[u8]) -> Result<DecodedFile> {
    decode::decompress_bytes(data)
}
