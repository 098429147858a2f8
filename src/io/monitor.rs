use rtrb::{Consumer, Producer, RingBuffer};

use crate::io::PwmOutput;

/// Forwards every committed duty to the real modulator and copies it into a
/// lock-free ring for a non-realtime observer (scope, recorder).
///
/// Pushing never blocks; when the observer falls behind, values are dropped
/// and counted.
pub struct MonitorTee<P> {
    inner: P,
    tx: Producer<u8>,
    dropped: u64,
}

impl<P: PwmOutput> MonitorTee<P> {
    pub fn new(inner: P, tx: Producer<u8>) -> Self {
        Self {
            inner,
            tx,
            dropped: 0,
        }
    }

    /// Build a tee and the consumer side of a ring holding `capacity` duties.
    pub fn with_capacity(inner: P, capacity: usize) -> (Self, Consumer<u8>) {
        let (tx, rx) = RingBuffer::new(capacity);
        (Self::new(inner, tx), rx)
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: PwmOutput> PwmOutput for MonitorTee<P> {
    fn set_duty_cycle(&mut self, duty: u8) {
        self.inner.set_duty_cycle(duty);
        if self.tx.push(duty).is_err() {
            self.dropped += 1;
        }
    }

    fn on_period_boundary(&mut self) {
        self.inner.on_period_boundary();
    }
}
