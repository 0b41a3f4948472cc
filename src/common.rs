//! Common types and constants for the LZ77 triple codec
//!
//! This module defines the core types, constants, and structures shared by the
//! encoding (triple generation + framing) and decoding (triple recovery +
//! reconstruction) halves of the crate.

use thiserror::Error;

/// Sliding-window configuration for encoding
///
/// The search buffer holds the most recently processed symbols and is the only
/// source of back-references; the look-ahead buffer is the window of upcoming
/// symbols being matched against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    search_buffer_size: usize,
    look_ahead_buffer_size: usize,
}

impl WindowConfig {
    /// Create a validated window configuration
    ///
    /// Both sizes must be at least 1 and at most [`MAX_BUFFER_SIZE`]; the
    /// upper bound keeps offsets and match lengths representable as `u16`
    /// symbols on the second-stage entropy path.
    pub fn new(search_buffer_size: usize, look_ahead_buffer_size: usize) -> Result<Self> {
        if search_buffer_size == 0 || search_buffer_size > MAX_BUFFER_SIZE {
            return Err(LztError::InvalidWindowConfig(format!(
                "search buffer size {search_buffer_size} out of range 1..={MAX_BUFFER_SIZE}"
            )));
        }
        if look_ahead_buffer_size == 0 || look_ahead_buffer_size > MAX_BUFFER_SIZE {
            return Err(LztError::InvalidWindowConfig(format!(
                "look-ahead buffer size {look_ahead_buffer_size} out of range 1..={MAX_BUFFER_SIZE}"
            )));
        }
        Ok(Self {
            search_buffer_size,
            look_ahead_buffer_size,
        })
    }

    /// Capacity of the search buffer in symbols
    pub fn search_buffer_size(&self) -> usize {
        self.search_buffer_size
    }

    /// Capacity of the look-ahead buffer in symbols
    pub fn look_ahead_buffer_size(&self) -> usize {
        self.look_ahead_buffer_size
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            search_buffer_size: DEFAULT_SEARCH_BUFFER_SIZE,
            look_ahead_buffer_size: DEFAULT_LOOK_AHEAD_BUFFER_SIZE,
        }
    }
}

/// One unit of LZ77 output
///
/// `offset` is the backward distance from the current write point to the start
/// of the matched back-reference, `length` the number of matched symbols, and
/// `literal` the single symbol that terminates the match. `offset == 0` iff
/// `length == 0` (stand-alone literal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple {
    /// Backward distance to the match start (0 when no match)
    pub offset: u32,
    /// Number of matched symbols copied from the back-reference
    pub length: u32,
    /// Trailing literal that terminates the match
    pub literal: u8,
}

impl Triple {
    /// Create a triple
    pub fn new(offset: u32, length: u32, literal: u8) -> Self {
        Self {
            offset,
            length,
            literal,
        }
    }

    /// Create a stand-alone literal triple (no match)
    pub fn literal_only(literal: u8) -> Self {
        Self {
            offset: 0,
            length: 0,
            literal,
        }
    }

    /// Number of input symbols this triple consumed during encoding
    pub fn consumed(&self) -> usize {
        self.length as usize + 1
    }
}

/// Kind of content carried by a compressed stream
///
/// Image streams carry enough header information (channel count and the
/// `width - height` difference) to recover the original dimensions from the
/// decoded byte count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Plain byte/text stream
    Text,
    /// Raster image stream
    Image {
        /// True for 3-channel (RGB) images, false for single-channel
        three_channel: bool,
        /// `width - height`, stored as a 14-bit signed header field
        dim_diff: i32,
    },
}

impl ContentType {
    /// Create an image content descriptor from its dimensions
    pub fn image(width: usize, height: usize, three_channel: bool) -> Result<Self> {
        let dim_diff = width as i64 - height as i64;
        if dim_diff < DIM_DIFF_MIN as i64 || dim_diff > DIM_DIFF_MAX as i64 {
            return Err(LztError::InvalidDimensionDiff(dim_diff as i32));
        }
        Ok(ContentType::Image {
            three_channel,
            dim_diff: dim_diff as i32,
        })
    }
}

/// Error type for codec operations
#[derive(Debug, Error)]
pub enum LztError {
    /// Window configuration outside the supported bounds
    #[error("Invalid window configuration: {0}")]
    InvalidWindowConfig(String),

    /// Header or payload fields that cannot be interpreted
    #[error("Malformed bitstream: {0}")]
    MalformedBitstream(String),

    /// Stream ended while a declared element count still expected data
    #[error("Truncated stream: expected {expected} elements, got {actual}")]
    TruncatedStream {
        /// Number of elements the stream header declared
        expected: usize,
        /// Number of elements actually recovered
        actual: usize,
    },

    /// Triple whose back-reference cannot be resolved against the output
    #[error(
        "Invalid triple: offset {offset}, length {length} with only {decoded_len} decoded symbols"
    )]
    InvalidTriple {
        /// Offset of the offending triple
        offset: u32,
        /// Length of the offending triple
        length: u32,
        /// Output symbols available when the triple was applied
        decoded_len: usize,
    },

    /// Image `width - height` difference outside the 14-bit header field
    #[error("Dimension difference {0} does not fit the 14-bit header field")]
    InvalidDimensionDiff(i32),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, LztError>;

/// Default search buffer capacity in symbols
pub const DEFAULT_SEARCH_BUFFER_SIZE: usize = 31;

/// Default look-ahead buffer capacity in symbols
pub const DEFAULT_LOOK_AHEAD_BUFFER_SIZE: usize = 15;

/// Upper bound for either buffer capacity
pub const MAX_BUFFER_SIZE: usize = u16::MAX as usize;

/// Number of bits used for each field-width header entry
pub const WIDTH_HEADER_BITS: u32 = 5;

/// Widest offset or length field a genuine stream can declare
///
/// Offsets and match lengths never exceed [`MAX_BUFFER_SIZE`], so their
/// minimal widths fit 16 bits; a wider declared field is malformed.
pub const MAX_FIELD_WIDTH_BITS: u32 = 16;

/// Number of bits used for a literal symbol
pub const LITERAL_BITS: u32 = 8;

/// Number of bits of the signed image `width - height` header field
pub const DIM_DIFF_BITS: u32 = 14;

/// Smallest representable image dimension difference
pub const DIM_DIFF_MIN: i32 = -(1 << (DIM_DIFF_BITS - 1));

/// Largest representable image dimension difference
pub const DIM_DIFF_MAX: i32 = (1 << (DIM_DIFF_BITS - 1)) - 1;

/// Minimal number of bits needed to represent `value`
///
/// Zero is defined to need zero bits; a zero-width field is simply absent
/// from the packed stream while its 5-bit width header entry is still written.
pub fn bit_width(value: u64) -> u32 {
    64 - value.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_config_bounds() {
        assert!(WindowConfig::new(31, 15).is_ok());
        assert!(WindowConfig::new(1, 1).is_ok());
        assert!(WindowConfig::new(MAX_BUFFER_SIZE, MAX_BUFFER_SIZE).is_ok());

        assert!(WindowConfig::new(0, 15).is_err());
        assert!(WindowConfig::new(31, 0).is_err());
        assert!(WindowConfig::new(MAX_BUFFER_SIZE + 1, 15).is_err());
    }

    #[test]
    fn test_window_config_default() {
        let config = WindowConfig::default();
        assert_eq!(config.search_buffer_size(), 31);
        assert_eq!(config.look_ahead_buffer_size(), 15);
    }

    #[test]
    fn test_triple_consumed() {
        assert_eq!(Triple::literal_only(b'a').consumed(), 1);
        assert_eq!(Triple::new(7, 3, b'a').consumed(), 4);
    }

    #[test]
    fn test_content_type_image() {
        let content = ContentType::image(640, 480, true).unwrap();
        assert_eq!(
            content,
            ContentType::Image {
                three_channel: true,
                dim_diff: 160
            }
        );

        // 14-bit signed field bounds
        assert!(ContentType::image(8192, 0, false).is_err());
        assert!(ContentType::image(0, 8193, false).is_err());
        assert!(ContentType::image(0, 8192, false).is_ok());
    }

    #[test]
    fn test_bit_width() {
        assert_eq!(bit_width(0), 0);
        assert_eq!(bit_width(1), 1);
        assert_eq!(bit_width(7), 3);
        assert_eq!(bit_width(8), 4);
        assert_eq!(bit_width(31), 5);
        assert_eq!(bit_width(u16::MAX as u64), MAX_FIELD_WIDTH_BITS);
        assert_eq!(bit_width(u64::MAX), 64);
    }
}
