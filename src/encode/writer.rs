//! Triple encoding driver and bitstream framing
//!
//! [`generate_triples`] runs the match finder and buffer slider over a whole
//! input sequence; [`write_triples`] frames the resulting list with minimal
//! field widths; [`compress_bytes`] produces a complete self-describing
//! stream in the on-disk ASCII bit form, optionally routing offsets and
//! lengths through the second-stage range coder.

use super::state::EncoderState;
use crate::bitstream::BitWriter;
use crate::common::{
    bit_width, ContentType, Result, Triple, WindowConfig, LITERAL_BITS, WIDTH_HEADER_BITS,
};
use crate::entropy;
use crate::format;

/// Generate the ordered triple list for `input`
///
/// Each iteration emits exactly one triple and consumes at least one symbol,
/// so the loop terminates after at most `input.len()` triples. An empty input
/// yields an empty list.
pub fn generate_triples(input: &[u8], config: WindowConfig) -> Vec<Triple> {
    let mut state = EncoderState::new(input, config);
    let mut triples = Vec::new();
    while !state.is_finished() {
        let triple = state.find_triple();
        state.advance(triple.consumed());
        triples.push(triple);
    }
    triples
}

/// Frame a triple list as a packed bitstream
///
/// Layout: a 5-bit `offset_bits_amount` and 5-bit `length_bits_amount`
/// header holding the minimal widths for the list maxima, then each triple
/// as `offset`, `length`, and an 8-bit literal with no padding in between.
/// A maximum of zero yields width zero; the header entry is still written.
pub fn write_triples(triples: &[Triple], writer: &mut BitWriter) {
    let offset_bits = triples
        .iter()
        .map(|t| t.offset as u64)
        .max()
        .map_or(0, bit_width);
    let length_bits = triples
        .iter()
        .map(|t| t.length as u64)
        .max()
        .map_or(0, bit_width);

    writer.push_bits(offset_bits as u64, WIDTH_HEADER_BITS);
    writer.push_bits(length_bits as u64, WIDTH_HEADER_BITS);

    for triple in triples {
        writer.push_bits(triple.offset as u64, offset_bits);
        writer.push_bits(triple.length as u64, length_bits);
        writer.push_bits(triple.literal as u64, LITERAL_BITS);
    }
}

/// Compress `input` into the on-disk ASCII bit form
///
/// Writes the file header, then either the raw packed triples or the
/// second-stage payload (range-coded offset and length streams followed by
/// the raw literals).
pub fn compress_bytes(
    input: &[u8],
    content: ContentType,
    config: WindowConfig,
    second_stage: bool,
) -> Result<Vec<u8>> {
    let triples = generate_triples(input, config);

    let mut writer = BitWriter::new();
    format::write_header(content, second_stage, &mut writer);
    if second_stage {
        write_entropy_payload(&triples, &mut writer);
    } else {
        write_triples(&triples, &mut writer);
    }
    Ok(writer.into_ascii())
}

/// Frame a triple list through the second-stage entropy coder
///
/// Layout: a 5-bit width plus the triple count, the range-coded offset
/// stream, the range-coded length stream, then one 8-bit literal per triple.
/// Offsets and lengths are coded as independent symbol streams; the count
/// tells the decoder how many symbols to pull back out of each.
fn write_entropy_payload(triples: &[Triple], writer: &mut BitWriter) {
    let count = triples.len() as u64;
    let count_bits = bit_width(count);
    writer.push_bits(count_bits as u64, WIDTH_HEADER_BITS);
    writer.push_bits(count, count_bits);

    let offsets: Vec<u16> = triples.iter().map(|t| t.offset as u16).collect();
    let lengths: Vec<u16> = triples.iter().map(|t| t.length as u16).collect();
    write_coded_stream(&offsets, writer);
    write_coded_stream(&lengths, writer);

    for triple in triples {
        writer.push_bits(triple.literal as u64, LITERAL_BITS);
    }
}

/// Range-code one symbol stream and frame it with its bit count
///
/// Layout: 5-bit width, the blob length in bits, then the coded bytes.
fn write_coded_stream(symbols: &[u16], writer: &mut BitWriter) {
    let coded = entropy::encode_symbols(symbols);
    let bit_count = (coded.len() * 8) as u64;
    let count_bits = bit_width(bit_count);
    writer.push_bits(count_bits as u64, WIDTH_HEADER_BITS);
    writer.push_bits(bit_count, count_bits);
    for byte in coded {
        writer.push_bits(byte as u64, 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitReader;

    fn config(search: usize, look_ahead: usize) -> WindowConfig {
        WindowConfig::new(search, look_ahead).unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_triples() {
        assert!(generate_triples(b"", config(7, 5)).is_empty());
    }

    #[test]
    fn test_single_byte_is_literal_only() {
        let triples = generate_triples(b"x", config(7, 5));
        assert_eq!(triples, vec![Triple::literal_only(b'x')]);
    }

    #[test]
    fn test_reference_sequence_triples() {
        // "aboboraeboba" with a 7/5 window, worked out by hand
        let triples = generate_triples(b"aboboraeboba", config(7, 5));
        assert_eq!(
            triples,
            vec![
                Triple::literal_only(b'a'),
                Triple::literal_only(b'b'),
                Triple::literal_only(b'o'),
                Triple::new(2, 2, b'r'),
                Triple::new(6, 1, b'e'),
                Triple::new(7, 3, b'a'),
            ]
        );
    }

    #[test]
    fn test_consumption_invariant() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let triples = generate_triples(input, config(15, 7));
        let consumed: usize = triples.iter().map(Triple::consumed).sum();
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn test_offsets_stay_in_bounds() {
        let input = b"abababababababababab";
        for cfg in [config(7, 5), config(31, 15), config(3, 2)] {
            for triple in generate_triples(input, cfg) {
                assert!(triple.offset as usize <= cfg.search_buffer_size());
                assert!((triple.length as usize) < cfg.look_ahead_buffer_size());
                assert_eq!(triple.offset == 0, triple.length == 0);
            }
        }
    }

    #[test]
    fn test_write_triples_header_widths() {
        let triples = vec![Triple::new(7, 3, b'a'), Triple::new(2, 1, b'b')];
        let mut writer = BitWriter::new();
        write_triples(&triples, &mut writer);

        let mut reader = BitReader::from(writer);
        assert_eq!(reader.read_bits(5), Some(3)); // max offset 7 needs 3 bits
        assert_eq!(reader.read_bits(5), Some(2)); // max length 3 needs 2 bits
        assert_eq!(reader.read_bits(3), Some(7));
        assert_eq!(reader.read_bits(2), Some(3));
        assert_eq!(reader.read_bits(8), Some(b'a' as u64));
    }

    #[test]
    fn test_write_triples_zero_widths() {
        // literal-only lists need no offset or length bits at all
        let triples = vec![Triple::literal_only(b'x'), Triple::literal_only(b'y')];
        let mut writer = BitWriter::new();
        write_triples(&triples, &mut writer);
        assert_eq!(writer.len(), 10 + 2 * 8);
    }

    #[test]
    fn test_compressed_form_is_ascii_bits() {
        let out = compress_bytes(b"aboboraeboba", ContentType::Text, config(7, 5), false).unwrap();
        assert!(out.iter().all(|&b| b == b'0' || b == b'1'));
        // header (2) + widths (10) + 6 triples of 3+2+8 bits
        assert_eq!(out.len(), 2 + 10 + 6 * 13);
    }
}
