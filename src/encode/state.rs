//! Encoding state management
//!
//! [`EncoderState`] holds the sliding window for one encode call: the search
//! buffer of recently processed symbols and a cursor into the input sequence
//! from which the look-ahead buffer is derived. The state is owned exclusively
//! by the driver loop and does not survive the call.

use crate::common::WindowConfig;

/// Sliding-window state for a single encode pass
#[derive(Debug)]
pub struct EncoderState<'a> {
    /// Window sizes for this pass
    pub(crate) config: WindowConfig,
    /// Valid symbols of the search buffer, oldest first
    ///
    /// Grows from empty up to `search_buffer_size`; there are no sentinel
    /// slots, an unfilled buffer simply offers fewer match positions.
    pub(crate) search_buffer: Vec<u8>,
    /// The full input sequence
    pub(crate) input: &'a [u8],
    /// Index of the first unconsumed input symbol
    pub(crate) cursor: usize,
}

impl<'a> EncoderState<'a> {
    /// Create a fresh state over `input`
    pub fn new(input: &'a [u8], config: WindowConfig) -> Self {
        Self {
            config,
            search_buffer: Vec::with_capacity(config.search_buffer_size()),
            input,
            cursor: 0,
        }
    }

    /// The look-ahead buffer: the next unconsumed symbols, capped at the
    /// configured look-ahead size
    pub fn look_ahead(&self) -> &[u8] {
        let end = self
            .input
            .len()
            .min(self.cursor + self.config.look_ahead_buffer_size());
        &self.input[self.cursor..end]
    }

    /// True once the whole input has been consumed
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.input.len()
    }

    /// Slide `consumed` symbols out of the look-ahead buffer into the search
    /// buffer, evicting the oldest symbols beyond its capacity
    pub fn advance(&mut self, consumed: usize) {
        debug_assert!(self.cursor + consumed <= self.input.len());
        self.search_buffer
            .extend_from_slice(&self.input[self.cursor..self.cursor + consumed]);
        let capacity = self.config.search_buffer_size();
        if self.search_buffer.len() > capacity {
            let excess = self.search_buffer.len() - capacity;
            self.search_buffer.drain(..excess);
        }
        self.cursor += consumed;
    }
}
