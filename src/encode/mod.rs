//! LZ77 encoding: triple generation and bitstream framing
//!
//! This module drives the sliding-window match finder over a whole input
//! sequence, producing an ordered triple list, and frames that list (together
//! with the file header) into the bit-exact output format.

mod matcher;
mod state;
mod writer;

pub use state::EncoderState;
pub use writer::{compress_bytes, generate_triples, write_triples};
