//! Triple recovery from packed bitstreams
//!
//! Two entry points matching the two payload layouts: [`read_raw_triples`]
//! for the single-stage path, where the stream is self-describing and ends
//! when a field read fails, and [`read_entropy_triples`] for the second-stage
//! path, where a declared triple count makes truncation detectable and any
//! shortfall is a hard error.

use crate::bitstream::BitReader;
use crate::common::{
    LztError, Result, Triple, LITERAL_BITS, MAX_FIELD_WIDTH_BITS, WIDTH_HEADER_BITS,
};
use crate::entropy;

/// Read raw packed triples until the stream runs out
///
/// Reads the 5+5-bit width header, then triples of
/// `offset_bits + length_bits + 8` bits each. A read failing mid-field is
/// the designed end-of-stream signal, not an error; an empty or header-less
/// stream simply yields no triples. Declared widths above
/// [`MAX_FIELD_WIDTH_BITS`] cannot come from a genuine stream (offsets and
/// match lengths are bounded by the window capacity) and are rejected
/// before any triple is read.
pub fn read_raw_triples(reader: &mut BitReader) -> Result<Vec<Triple>> {
    let Some(offset_bits) = reader.read_bits(WIDTH_HEADER_BITS) else {
        return Ok(Vec::new());
    };
    let Some(length_bits) = reader.read_bits(WIDTH_HEADER_BITS) else {
        return Ok(Vec::new());
    };
    if offset_bits > MAX_FIELD_WIDTH_BITS as u64 || length_bits > MAX_FIELD_WIDTH_BITS as u64 {
        return Err(LztError::MalformedBitstream(format!(
            "declared field widths ({offset_bits}, {length_bits}) exceed the \
             {MAX_FIELD_WIDTH_BITS}-bit window bound"
        )));
    }

    let mut triples = Vec::new();
    loop {
        let Some(offset) = reader.read_bits(offset_bits as u32) else {
            break;
        };
        let Some(length) = reader.read_bits(length_bits as u32) else {
            break;
        };
        let Some(literal) = reader.read_bits(LITERAL_BITS) else {
            break;
        };
        triples.push(Triple::new(offset as u32, length as u32, literal as u8));
    }
    Ok(triples)
}

/// Read the second-stage payload back into a triple list
///
/// Layout: the declared triple count, a range-coded offset stream, a
/// range-coded length stream, then one 8-bit literal per triple. The
/// declared count turns every premature end of stream into a
/// [`LztError::TruncatedStream`].
pub fn read_entropy_triples(reader: &mut BitReader) -> Result<Vec<Triple>> {
    let count_bits = reader
        .read_bits(WIDTH_HEADER_BITS)
        .ok_or_else(|| truncated_field("triple count width"))?;
    let count = reader
        .read_bits(count_bits as u32)
        .ok_or_else(|| truncated_field("triple count"))? as usize;

    // every triple still needs its 8-bit literal, so a declared count the
    // remaining stream cannot possibly carry is truncation up front, before
    // any allocation or decoding work is sized by it
    let stream_capacity = reader.remaining() / LITERAL_BITS as usize;
    if count > stream_capacity {
        return Err(LztError::TruncatedStream {
            expected: count,
            actual: stream_capacity,
        });
    }

    let offsets = read_coded_stream(reader, count)?;
    let lengths = read_coded_stream(reader, count)?;

    let mut literals = Vec::with_capacity(count);
    for recovered in 0..count {
        let literal = reader
            .read_bits(LITERAL_BITS)
            .ok_or(LztError::TruncatedStream {
                expected: count,
                actual: recovered,
            })?;
        literals.push(literal as u8);
    }

    Ok(offsets
        .iter()
        .zip(&lengths)
        .zip(&literals)
        .map(|((&offset, &length), &literal)| Triple::new(offset as u32, length as u32, literal))
        .collect())
}

/// Read one range-coded symbol stream and decode `count` symbols from it
fn read_coded_stream(reader: &mut BitReader, count: usize) -> Result<Vec<u16>> {
    let width = reader
        .read_bits(WIDTH_HEADER_BITS)
        .ok_or_else(|| truncated_field("coded stream bit-count width"))?;
    let bit_count = reader
        .read_bits(width as u32)
        .ok_or_else(|| truncated_field("coded stream bit count"))? as usize;
    if bit_count % 8 != 0 {
        return Err(LztError::MalformedBitstream(format!(
            "coded stream length of {bit_count} bits is not whole bytes"
        )));
    }
    if bit_count > reader.remaining() {
        return Err(LztError::TruncatedStream {
            expected: bit_count / 8,
            actual: reader.remaining() / 8,
        });
    }

    let mut blob = Vec::with_capacity(bit_count / 8);
    for recovered in 0..bit_count / 8 {
        let byte = reader.read_bits(8).ok_or(LztError::TruncatedStream {
            expected: bit_count / 8,
            actual: recovered,
        })?;
        blob.push(byte as u8);
    }
    entropy::decode_symbols(&blob, count)
}

fn truncated_field(field: &str) -> LztError {
    LztError::MalformedBitstream(format!("stream ended inside the payload ({field})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitWriter;
    use crate::encode::write_triples;

    #[test]
    fn test_raw_round_trip() {
        let triples = vec![
            Triple::literal_only(b'a'),
            Triple::new(1, 1, b'b'),
            Triple::new(2, 1, b'c'),
        ];
        let mut writer = BitWriter::new();
        write_triples(&triples, &mut writer);
        let mut reader = BitReader::from(writer);
        assert_eq!(read_raw_triples(&mut reader).unwrap(), triples);
    }

    #[test]
    fn test_raw_empty_stream() {
        let mut reader = BitReader::from_ascii(b"").unwrap();
        assert!(read_raw_triples(&mut reader).unwrap().is_empty());
    }

    #[test]
    fn test_raw_zero_width_fields_end_on_literal() {
        // widths (0, 0): each triple is just a literal; the loop ends when
        // the 8-bit literal read fails, not by spinning on zero-width reads
        let triples = vec![Triple::literal_only(b'x')];
        let mut writer = BitWriter::new();
        write_triples(&triples, &mut writer);
        let mut reader = BitReader::from(writer);
        assert_eq!(read_raw_triples(&mut reader).unwrap(), triples);
    }

    #[test]
    fn test_raw_trailing_partial_triple_is_end_of_stream() {
        let triples = vec![Triple::new(3, 2, b'q')];
        let mut writer = BitWriter::new();
        write_triples(&triples, &mut writer);
        // a few stray bits after the last triple must not produce another
        writer.push_bits(0b101, 3);
        let mut reader = BitReader::from(writer);
        assert_eq!(read_raw_triples(&mut reader).unwrap(), triples);
    }

    #[test]
    fn test_raw_rejects_oversized_field_widths() {
        // a 5-bit width header can claim up to 31-bit fields, far beyond
        // anything a window-bounded offset or length needs; one such triple
        // would otherwise expand to gigabytes during reconstruction
        let mut writer = BitWriter::new();
        writer.push_bits(1, 5); // offset width
        writer.push_bits(31, 5); // length width
        writer.push_bits(1, 1);
        writer.push_bits((1u64 << 31) - 1, 31);
        writer.push_bits(b'a' as u64, 8);
        let mut reader = BitReader::from(writer);
        assert!(matches!(
            read_raw_triples(&mut reader),
            Err(LztError::MalformedBitstream(_))
        ));
    }

    #[test]
    fn test_entropy_rejects_count_beyond_stream_capacity() {
        // a near-2^31 declared count over an 8-bit blob must fail before
        // any count-sized allocation or decoding happens
        let mut writer = BitWriter::new();
        writer.push_bits(31, 5); // count width
        writer.push_bits((1u64 << 31) - 1, 31);
        writer.push_bits(5, 5); // offset blob bit-count width
        writer.push_bits(8, 5); // one coded byte
        writer.push_bits(0, 8);
        let mut reader = BitReader::from(writer);
        assert!(matches!(
            read_entropy_triples(&mut reader),
            Err(LztError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_entropy_truncated_literals() {
        let input = b"abcabcabc";
        let ascii = crate::encode::compress_bytes(
            input,
            crate::common::ContentType::Text,
            crate::common::WindowConfig::new(7, 5).unwrap(),
            true,
        )
        .unwrap();

        // drop the last literal's worth of bits
        let mut reader = BitReader::from_ascii(&ascii[..ascii.len() - 8]).unwrap();
        let header = crate::format::read_header(&mut reader).unwrap();
        assert!(header.second_stage);
        assert!(matches!(
            read_entropy_triples(&mut reader),
            Err(LztError::TruncatedStream { .. })
        ));
    }
}
