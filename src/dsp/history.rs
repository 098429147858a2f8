use crate::{dsp::Sample, HISTORY_LEN};

const MASK: usize = HISTORY_LEN - 1;

const _: () = assert!(HISTORY_LEN.is_power_of_two());

/// Ring of the most recent filtered samples.
///
/// The slot at `index()` always holds the newest sample once `write` has run
/// for the current period. Older slots are only overwritten when the index
/// wraps past them.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    buffer: [Sample; HISTORY_LEN],
    write_pos: usize,
}

impl SampleHistory {
    pub const fn new() -> Self {
        Self {
            buffer: [0; HISTORY_LEN],
            write_pos: 0,
        }
    }

    /// Store the newest sample at the write index.
    #[inline]
    pub fn write(&mut self, sample: Sample) {
        self.buffer[self.write_pos] = sample;
    }

    /// Move the write index to the next slot, wrapping at capacity.
    #[inline]
    pub fn advance(&mut self) {
        self.write_pos = (self.write_pos + 1) & MASK;
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.write_pos
    }

    #[inline]
    pub fn current(&self) -> Sample {
        self.buffer[self.write_pos]
    }

    /// Read any slot; the index is reduced modulo capacity.
    #[inline]
    pub fn at(&self, slot: usize) -> Sample {
        self.buffer[slot & MASK]
    }

    /// Periods elapsed since `slot` was last written, relative to the current index.
    #[inline]
    pub fn age_of(&self, slot: usize) -> usize {
        self.write_pos.wrapping_sub(slot) & MASK
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0);
        self.write_pos = 0;
    }
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new()
    }
}
