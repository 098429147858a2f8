// Purpose - peripheral interfaces the handlers talk to, format conversions

pub mod converter;
#[cfg(feature = "rtrb")]
pub mod monitor;
pub mod sim;

use crate::dsp::Sample;

/// The analog-to-digital converter as seen by the sampling handler.
pub trait AnalogInput {
    /// Start one conversion. Its result is ready before the next sample period.
    fn trigger_sample_acquisition(&mut self);

    /// Most recently completed conversion, centered on zero.
    fn read_last_sample(&mut self) -> Sample;
}

/// The pulse-width modulator as seen by the commit handler.
pub trait PwmOutput {
    /// Load the buffered compare value; it takes effect at the next period boundary.
    fn set_duty_cycle(&mut self, duty: u8);

    /// Called by hardware models at the modulator's period boundary.
    fn on_period_boundary(&mut self) {}
}
