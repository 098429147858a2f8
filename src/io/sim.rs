//! Host models of the converter and the modulator.

use crate::{
    dsp::Sample,
    io::{converter::center_raw, AnalogInput, PwmOutput},
    SAMPLE_MIDPOINT,
};

/// Converter fed from an iterator of raw 8-bit readings.
///
/// Each trigger samples the next input value; the result only becomes
/// readable after the following trigger, like a conversion that completes
/// during the rest of the period. When the source runs dry the last value is
/// held.
pub struct SimulatedAdc<S> {
    source: S,
    in_flight: Option<u8>,
    completed: u8,
    held: u8,
    conversions: u64,
}

impl<S: Iterator<Item = u8>> SimulatedAdc<S> {
    pub fn new<I: IntoIterator<IntoIter = S>>(source: I) -> Self {
        Self {
            source: source.into_iter(),
            in_flight: None,
            // Idle result reads as zero after centering
            completed: SAMPLE_MIDPOINT,
            held: SAMPLE_MIDPOINT,
            conversions: 0,
        }
    }

    pub fn conversions(&self) -> u64 {
        self.conversions
    }
}

impl SimulatedAdc<core::iter::Repeat<u8>> {
    pub fn constant(raw: u8) -> Self {
        Self::new(core::iter::repeat(raw))
    }
}

impl<S: Iterator<Item = u8>> AnalogInput for SimulatedAdc<S> {
    fn trigger_sample_acquisition(&mut self) {
        if let Some(done) = self.in_flight.take() {
            self.completed = done;
        }
        let next = self.source.next().unwrap_or(self.held);
        self.held = next;
        self.in_flight = Some(next);
        self.conversions += 1;
    }

    fn read_last_sample(&mut self) -> Sample {
        center_raw(self.completed)
    }
}

/// Modulator with a buffered compare register.
///
/// Writes land in the buffer and only reach the output at a period boundary,
/// so a duty change can never cut a pulse short.
#[derive(Debug, Default)]
pub struct SimulatedPwm {
    buffered: u8,
    active: u8,
    record: bool,
    latched: Vec<u8>,
    writes: u64,
}

impl SimulatedPwm {
    pub fn new() -> Self {
        Self {
            buffered: SAMPLE_MIDPOINT,
            active: SAMPLE_MIDPOINT,
            ..Default::default()
        }
    }

    /// Keep every duty that became active, one entry per modulator period.
    pub fn recording() -> Self {
        Self {
            record: true,
            ..Self::new()
        }
    }

    /// Duty currently shaping the output pulse.
    pub fn active(&self) -> u8 {
        self.active
    }

    pub fn buffered(&self) -> u8 {
        self.buffered
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn latched(&self) -> &[u8] {
        &self.latched
    }

    pub fn take_latched(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.latched)
    }
}

impl PwmOutput for SimulatedPwm {
    fn set_duty_cycle(&mut self, duty: u8) {
        self.buffered = duty;
        self.writes += 1;
    }

    fn on_period_boundary(&mut self) {
        self.active = self.buffered;
        if self.record {
            self.latched.push(self.active);
        }
    }
}
