use core::sync::atomic::{AtomicU8, Ordering};

use crate::SAMPLE_MIDPOINT;

/// Duty value passed from the sampling handler to the commit handler.
///
/// One writer, one reader, one byte: a single atomic store/load is the whole
/// protocol. The reader can never see a torn value, and because the commit
/// always fires later in the same period, it sees the value just produced.
#[derive(Debug)]
pub struct PendingOutput {
    duty: AtomicU8,
}

impl PendingOutput {
    pub const fn new(duty: u8) -> Self {
        Self {
            duty: AtomicU8::new(duty),
        }
    }

    #[inline]
    pub fn publish(&self, duty: u8) {
        self.duty.store(duty, Ordering::Release);
    }

    #[inline]
    pub fn latest(&self) -> u8 {
        self.duty.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.publish(SAMPLE_MIDPOINT);
    }
}

impl Default for PendingOutput {
    /// Starts at the midpoint so the modulator idles at silence.
    fn default() -> Self {
        Self::new(SAMPLE_MIDPOINT)
    }
}
