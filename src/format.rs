//! File header framing and image dimension recovery
//!
//! Every compressed stream starts with a small header describing what was
//! compressed and how the payload is framed:
//!
//! ```text
//! [1 bit]         content type: 0 = text, 1 = image
//! [1 bit]         (image only) channel flag: 1 = 3-channel, 0 = 1-channel
//! [14-bit signed] (image only) width - height
//! [1 bit]         second-stage flag: 1 = range-coded payload, 0 = raw triples
//! ```
//!
//! Image streams do not store their dimensions directly; the decoder solves
//! `h^2 + diff*h - pixels = 0` for the positive root, which is exact because
//! `width = height + diff` and `pixels = height * width` hold by construction.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{ContentType, LztError, Result, DIM_DIFF_BITS};

/// Parsed leading header of a compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// What kind of content the payload reconstructs
    pub content: ContentType,
    /// True when the payload is entropy-coded (second encoding step)
    pub second_stage: bool,
}

/// Write the stream header bits
pub fn write_header(content: ContentType, second_stage: bool, writer: &mut BitWriter) {
    match content {
        ContentType::Text => writer.push_bit(false),
        ContentType::Image {
            three_channel,
            dim_diff,
        } => {
            writer.push_bit(true);
            writer.push_bit(three_channel);
            writer.push_signed(dim_diff as i64, DIM_DIFF_BITS);
        }
    }
    writer.push_bit(second_stage);
}

/// Read and validate the stream header bits
pub fn read_header(reader: &mut BitReader) -> Result<StreamHeader> {
    let is_image = reader
        .read_bit()
        .ok_or_else(|| truncated_header("content type bit"))?;

    let content = if is_image {
        let three_channel = reader
            .read_bit()
            .ok_or_else(|| truncated_header("channel flag"))?;
        let dim_diff = reader
            .read_signed(DIM_DIFF_BITS)
            .ok_or_else(|| truncated_header("dimension difference"))?;
        ContentType::Image {
            three_channel,
            dim_diff: dim_diff as i32,
        }
    } else {
        ContentType::Text
    };

    let second_stage = reader
        .read_bit()
        .ok_or_else(|| truncated_header("second-stage flag"))?;

    Ok(StreamHeader {
        content,
        second_stage,
    })
}

fn truncated_header(field: &str) -> LztError {
    LztError::MalformedBitstream(format!("stream ended inside the header ({field})"))
}

/// Recover `(height, width)` of a decoded image
///
/// Solves `h^2 + diff*h - total/channels = 0` and takes the positive root
/// rounded to the nearest integer, then verifies the solution reproduces the
/// decoded byte count exactly.
pub fn recover_dimensions(
    dim_diff: i32,
    total_bytes: usize,
    channels: usize,
) -> Result<(usize, usize)> {
    if total_bytes % channels != 0 {
        return Err(LztError::MalformedBitstream(format!(
            "{total_bytes} decoded bytes are not divisible into {channels} channels"
        )));
    }
    let pixels = (total_bytes / channels) as f64;
    let diff = dim_diff as f64;

    let discriminant = diff * diff + 4.0 * pixels;
    let height = ((-diff + discriminant.sqrt()) / 2.0).round() as i64;
    let width = height + dim_diff as i64;

    if height < 0 || width < 0 || (height * width * channels as i64) as usize != total_bytes {
        return Err(LztError::MalformedBitstream(format!(
            "dimension difference {dim_diff} does not solve to integer dimensions \
             for {total_bytes} bytes in {channels} channel(s)"
        )));
    }

    Ok((height as usize, width as usize))
}
