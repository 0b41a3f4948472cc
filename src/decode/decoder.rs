//! Sequence reconstruction from a triple list
//!
//! The reconstruction step is shared by both decode entry points: every
//! triple either appends its stand-alone literal or copies a back-reference
//! of `length` symbols starting `offset` positions before the current end of
//! the output, then appends the trailing literal.
//!
//! The copy runs symbol by symbol because a back-reference may overlap the
//! output being produced: a triple like `(2, 4, _)` against a decoded tail
//! `"ab"` reads its own first copied symbols to yield `"abab"` (run-length
//! patterns produce these routinely). A single atomic slice copy would read
//! stale data there.

use crate::common::{LztError, Result, Triple};

/// Rebuild the original byte sequence from an ordered triple list
///
/// Pure function of its input: replaying the same list always yields the
/// same bytes. A triple whose offset reaches behind the start of the output
/// produced so far, or a match-less triple carrying an offset, is rejected
/// as [`LztError::InvalidTriple`].
pub fn decode_from_triples(triples: &[Triple]) -> Result<Vec<u8>> {
    let mut output: Vec<u8> = Vec::new();

    for triple in triples {
        if triple.offset == 0 && triple.length == 0 {
            output.push(triple.literal);
            continue;
        }

        let offset = triple.offset as usize;
        if triple.offset == 0 || offset > output.len() {
            return Err(LztError::InvalidTriple {
                offset: triple.offset,
                length: triple.length,
                decoded_len: output.len(),
            });
        }

        let start = output.len() - offset;
        for index in 0..triple.length as usize {
            let symbol = output[start + index];
            output.push(symbol);
        }
        output.push(triple.literal);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(decode_from_triples(&[]).unwrap(), b"");
    }

    #[test]
    fn test_literal_only_triples() {
        let triples = vec![
            Triple::literal_only(b'a'),
            Triple::literal_only(b'b'),
            Triple::literal_only(b'c'),
        ];
        assert_eq!(decode_from_triples(&triples).unwrap(), b"abc");
    }

    #[test]
    fn test_back_reference_copy() {
        let triples = vec![
            Triple::literal_only(b'a'),
            Triple::literal_only(b'b'),
            Triple::literal_only(b'o'),
            Triple::new(2, 2, b'r'),
            Triple::new(6, 1, b'e'),
            Triple::new(7, 3, b'a'),
        ];
        assert_eq!(decode_from_triples(&triples).unwrap(), b"aboboraeboba");
    }

    #[test]
    fn test_self_referential_copy() {
        // length exceeds offset: the copy reads symbols it just produced
        let triples = vec![
            Triple::literal_only(b'a'),
            Triple::literal_only(b'b'),
            Triple::new(2, 4, b'a'),
        ];
        assert_eq!(decode_from_triples(&triples).unwrap(), b"abababa");
    }

    #[test]
    fn test_run_length_expansion() {
        let triples = vec![Triple::literal_only(b'z'), Triple::new(1, 9, b'z')];
        assert_eq!(decode_from_triples(&triples).unwrap(), b"zzzzzzzzzzz");
    }

    #[test]
    fn test_offset_beyond_output_is_invalid() {
        let triples = vec![Triple::literal_only(b'a'), Triple::new(5, 2, b'b')];
        assert!(matches!(
            decode_from_triples(&triples),
            Err(LztError::InvalidTriple { decoded_len: 1, .. })
        ));
    }

    #[test]
    fn test_zero_offset_with_length_is_invalid() {
        let triples = vec![Triple::literal_only(b'a'), Triple::new(0, 3, b'b')];
        assert!(decode_from_triples(&triples).is_err());
    }

    #[test]
    fn test_deterministic() {
        let triples = vec![
            Triple::literal_only(b'x'),
            Triple::new(1, 3, b'y'),
            Triple::new(5, 4, b'z'),
        ];
        let first = decode_from_triples(&triples).unwrap();
        let second = decode_from_triples(&triples).unwrap();
        assert_eq!(first, second);
    }
}
