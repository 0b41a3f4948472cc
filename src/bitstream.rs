//! Bit-exact framing primitives
//!
//! [`BitWriter`] and [`BitReader`] append and consume fixed-width unsigned and
//! signed integers on a growable bit buffer, most significant bit first. They
//! are the leaf dependency of every framing layer in the crate.
//!
//! The persisted on-disk form of a stream is one ASCII `'0'`/`'1'` character
//! per bit (not packed bytes); [`BitWriter::into_ascii`] and
//! [`BitReader::from_ascii`] convert between the two representations
//! bit-exactly.

use crate::common::{LztError, Result};

/// Append-only bit buffer, most significant bit first
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    buf: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.bit_len
    }

    /// True if no bits have been written
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Append a single bit
    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_len / 8;
        if byte_index == self.buf.len() {
            self.buf.push(0);
        }
        if bit {
            self.buf[byte_index] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Append the low `width` bits of `value`, most significant first
    ///
    /// `width` may be 0, in which case nothing is written. Bits of `value`
    /// above `width` must be clear.
    pub fn push_bits(&mut self, value: u64, width: u32) {
        debug_assert!(width <= 64);
        debug_assert!(width == 64 || value >> width == 0, "value exceeds field width");
        for shift in (0..width).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    /// Append `value` as a `width`-bit two's complement integer
    pub fn push_signed(&mut self, value: i64, width: u32) {
        debug_assert!((1..=64).contains(&width));
        let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
        self.push_bits((value as u64) & mask, width);
    }

    /// Serialize to the on-disk ASCII form, one `'0'`/`'1'` byte per bit
    pub fn into_ascii(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bit_len);
        for index in 0..self.bit_len {
            let bit = (self.buf[index / 8] >> (7 - index % 8)) & 1;
            out.push(b'0' + bit);
        }
        out
    }
}

/// Cursor over a fixed bit buffer, most significant bit first
#[derive(Debug, Clone)]
pub struct BitReader {
    buf: Vec<u8>,
    bit_len: usize,
    pos: usize,
}

impl BitReader {
    /// Parse the on-disk ASCII form into a reader
    ///
    /// Any byte other than `'0'` or `'1'` is rejected.
    pub fn from_ascii(data: &[u8]) -> Result<Self> {
        let mut buf = vec![0u8; data.len().div_ceil(8)];
        for (index, &byte) in data.iter().enumerate() {
            match byte {
                b'0' => {}
                b'1' => buf[index / 8] |= 0x80 >> (index % 8),
                other => {
                    return Err(LztError::MalformedBitstream(format!(
                        "byte {other:#04x} at position {index} is not an ASCII bit"
                    )))
                }
            }
        }
        Ok(Self {
            buf,
            bit_len: data.len(),
            pos: 0,
        })
    }

    /// Number of unread bits
    pub fn remaining(&self) -> usize {
        self.bit_len - self.pos
    }

    /// Read one bit; `None` at end of stream
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bit_len {
            return None;
        }
        let bit = (self.buf[self.pos / 8] >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Read a `width`-bit unsigned integer, most significant bit first
    ///
    /// Returns `None` without consuming anything when fewer than `width`
    /// bits remain; end-of-stream mid-field is the designed termination
    /// signal of the raw triple loop, not an error. A zero-width read
    /// always succeeds with 0.
    pub fn read_bits(&mut self, width: u32) -> Option<u64> {
        debug_assert!(width <= 64);
        if self.remaining() < width as usize {
            return None;
        }
        let mut value = 0u64;
        for _ in 0..width {
            let bit = (self.buf[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | bit as u64;
            self.pos += 1;
        }
        Some(value)
    }

    /// Read a `width`-bit two's complement signed integer
    pub fn read_signed(&mut self, width: u32) -> Option<i64> {
        debug_assert!((1..=64).contains(&width));
        let raw = self.read_bits(width)?;
        if width < 64 && raw >> (width - 1) & 1 == 1 {
            Some((raw | !0u64 << width) as i64)
        } else {
            Some(raw as i64)
        }
    }
}

impl From<BitWriter> for BitReader {
    fn from(writer: BitWriter) -> Self {
        let bit_len = writer.bit_len;
        Self {
            buf: writer.buf,
            bit_len,
            pos: 0,
        }
    }
}
