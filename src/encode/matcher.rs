//! Sliding-window match finding
//!
//! This module implements the core of the encoder: finding the longest prefix
//! of the look-ahead buffer that occurs in the search buffer and folding the
//! result into an `(offset, length, literal)` triple.
//!
//! The search grows a candidate length one symbol at a time, keeping the list
//! of search-buffer start positions that still match; when no position
//! survives the next extension the previous length is the longest match.
//! Matches are confined to the search buffer, so `offset >= length` always
//! holds for emitted triples (the decoder nevertheless handles overlapping
//! copies). The match length is capped one short of the look-ahead buffer so
//! that every triple carries a trailing literal, including at end of input.

use super::state::EncoderState;
use crate::common::Triple;

impl EncoderState<'_> {
    /// Find the triple for the current window position
    ///
    /// The look-ahead buffer must be non-empty; the driver loop terminates
    /// before calling this on exhausted input. Exactly one triple is
    /// returned per call, consuming `length + 1` look-ahead symbols.
    ///
    /// Tie-break: among equal-length matches the most recent occurrence
    /// (largest start position, smallest offset) wins.
    pub fn find_triple(&self) -> Triple {
        let look_ahead = self.look_ahead();
        debug_assert!(!look_ahead.is_empty());
        let search = &self.search_buffer;

        // Cap one short of the look-ahead window so a trailing literal
        // always exists, even when the match would consume all remaining
        // input.
        let max_length = look_ahead.len() - 1;

        let mut candidates: Vec<usize> = (0..search.len())
            .filter(|&pos| search[pos] == look_ahead[0])
            .collect();

        if candidates.is_empty() || max_length == 0 {
            return Triple::literal_only(look_ahead[0]);
        }

        let mut length = 1;
        while length < max_length {
            let survivors: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&pos| {
                    pos + length < search.len() && search[pos + length] == look_ahead[length]
                })
                .collect();
            if survivors.is_empty() {
                break;
            }
            candidates = survivors;
            length += 1;
        }

        // candidates are in ascending position order; the last one is the
        // most recent occurrence
        let start = *candidates.last().expect("at least one candidate survives");
        let offset = (search.len() - start) as u32;
        Triple::new(offset, length as u32, look_ahead[length])
    }
}
