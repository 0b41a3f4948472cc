//! Second-stage entropy coding of offset and length streams
//!
//! The optional second encoding step routes the offset and length columns of
//! the triple list through an adaptive integer range coder before final bit
//! packing. This replaces the arbitrary-precision decimal arithmetic coder of
//! earlier designs with renormalizing 32-bit integer registers (the Subbotin
//! carryless variant): a byte is emitted whenever the top byte of the coding
//! interval is settled, and the range is clamped when it drops below the
//! renormalization threshold so no carry can propagate into already-emitted
//! bytes.
//!
//! The model is adaptive: all 256 byte values start with count 1, each coded
//! byte increments its own count, and the counts are halved when the total
//! reaches [`MAX_TOTAL_FREQ`]. Encoder and decoder update the model in
//! lockstep, so no frequency table travels with the blob; the decoder only
//! needs the symbol count, which the payload framing carries.
//!
//! Symbols are 16-bit (offsets and match lengths are bounded by the window
//! configuration) and are coded as their little-endian byte pairs.

use crate::common::{LztError, Result};

/// Maximum total model frequency before counts are halved
///
/// Must stay below the renormalization threshold so `range / total` never
/// reaches zero.
const MAX_TOTAL_FREQ: u32 = 1 << 14;

/// Alphabet size of the byte model
const NUM_SYMBOLS: usize = 256;

/// A coded byte is settled once the interval agrees on its top byte
const TOP: u32 = 1 << 24;

/// Renormalization threshold for the interval width
const BOTTOM: u32 = 1 << 16;

/// Adaptive byte-frequency model shared by encoder and decoder
#[derive(Debug, Clone)]
struct ByteModel {
    counts: [u32; NUM_SYMBOLS],
    cumulative: [u32; NUM_SYMBOLS + 1],
}

impl ByteModel {
    fn new() -> Self {
        let mut model = Self {
            counts: [1; NUM_SYMBOLS],
            cumulative: [0; NUM_SYMBOLS + 1],
        };
        model.rebuild();
        model
    }

    fn rebuild(&mut self) {
        let mut running = 0;
        for (index, &count) in self.counts.iter().enumerate() {
            self.cumulative[index] = running;
            running += count;
        }
        self.cumulative[NUM_SYMBOLS] = running;
    }

    fn total(&self) -> u32 {
        self.cumulative[NUM_SYMBOLS]
    }

    /// Frequency interval `[low, high)` of `byte` within the total
    fn interval(&self, byte: u8) -> (u32, u32) {
        let index = byte as usize;
        (self.cumulative[index], self.cumulative[index + 1])
    }

    /// Byte whose cumulative interval contains `target`
    fn lookup(&self, target: u32) -> u8 {
        let mut lo = 0usize;
        let mut hi = NUM_SYMBOLS;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.cumulative[mid + 1] <= target {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo as u8
    }

    fn record(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
        if self.total() + 1 >= MAX_TOTAL_FREQ {
            for count in &mut self.counts {
                *count = (*count + 1) / 2;
            }
        }
        self.rebuild();
    }
}

/// Range-code a 16-bit symbol stream into a byte blob
pub fn encode_symbols(symbols: &[u16]) -> Vec<u8> {
    if symbols.is_empty() {
        return Vec::new();
    }

    let mut model = ByteModel::new();
    let mut low = 0u32;
    let mut range = u32::MAX;
    let mut output = Vec::new();

    for &symbol in symbols {
        for byte in symbol.to_le_bytes() {
            let (cum_low, cum_high) = model.interval(byte);
            let total = model.total();

            let slot = range / total;
            low = low.wrapping_add(cum_low.wrapping_mul(slot));
            if cum_high < total {
                range = (cum_high - cum_low) * slot;
            } else {
                range -= cum_low * slot;
            }

            normalize(&mut low, &mut range, |settled| output.push(settled));
            model.record(byte);
        }
    }

    // flush: the next four bytes of `low` pin the final interval
    for _ in 0..4 {
        output.push((low >> 24) as u8);
        low <<= 8;
    }
    output
}

/// Decode `count` 16-bit symbols out of a range-coded blob
pub fn decode_symbols(data: &[u8], count: usize) -> Result<Vec<u16>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if data.is_empty() {
        return Err(LztError::MalformedBitstream(
            "empty range-coded stream with a non-zero symbol count".into(),
        ));
    }

    let mut model = ByteModel::new();
    let mut low = 0u32;
    let mut range = u32::MAX;
    let mut pos = 0usize;
    let next_byte = |pos: &mut usize| -> u8 {
        let byte = data.get(*pos).copied().unwrap_or(0);
        *pos += 1;
        byte
    };

    let mut code = 0u32;
    for _ in 0..4 {
        code = (code << 8) | next_byte(&mut pos) as u32;
    }

    let mut symbols = Vec::with_capacity(count);
    let mut pending = [0u8; 2];
    for index in 0..count * 2 {
        let total = model.total();
        let slot = range / total;
        let target = (code.wrapping_sub(low) / slot).min(total - 1);

        let byte = model.lookup(target);
        let (cum_low, cum_high) = model.interval(byte);

        low = low.wrapping_add(cum_low.wrapping_mul(slot));
        if cum_high < total {
            range = (cum_high - cum_low) * slot;
        } else {
            range -= cum_low * slot;
        }

        normalize(&mut low, &mut range, |_| {
            code = (code << 8) | next_byte(&mut pos) as u32;
        });
        model.record(byte);

        pending[index % 2] = byte;
        if index % 2 == 1 {
            symbols.push(u16::from_le_bytes(pending));
        }
    }

    Ok(symbols)
}

/// Subbotin carryless renormalization
///
/// Emits (or consumes, on the decode side) one byte per iteration while the
/// top byte is settled; when it is not but the range has shrunk below
/// [`BOTTOM`], the range is clamped so the top byte settles without a carry.
fn normalize(low: &mut u32, range: &mut u32, mut shift: impl FnMut(u8)) {
    while *low ^ low.wrapping_add(*range) < TOP || *range < BOTTOM {
        if *low ^ low.wrapping_add(*range) >= TOP {
            *range = low.wrapping_neg() & (BOTTOM - 1);
        }
        shift((*low >> 24) as u8);
        *low <<= 8;
        *range <<= 8;
    }
}
