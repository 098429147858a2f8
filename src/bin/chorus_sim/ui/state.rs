//! Shared state types for UI communication
//!
//! Static data is handed over once before the stream starts; updates from the
//! audio callback are `Copy` and allocation-free.

use pwm_chorus::dsp::EffectKind;

/// Static state sent once at initialization
#[derive(Clone, Debug)]
pub struct UiStateInit {
    /// Pipeline sample rate in Hz
    pub sample_rate_hz: f32,
    /// Modulator frequency in Hz
    pub pwm_hz: f32,
    /// Tick at which the commit handler fires
    pub commit_tick: u32,
    /// Timer ticks per sample period
    pub sample_period_ticks: u32,
    /// Output device rate in Hz
    pub device_rate: f32,
    pub effect: EffectKind,
    pub chorus_period: u16,
}

/// Dynamic state update sent from the audio callback
#[derive(Clone, Copy, Debug, Default)]
pub struct UiStateUpdate {
    /// Sample periods processed
    pub periods: u64,
    /// Current chorus delay offset (None when bypassed)
    pub chorus_delay: Option<u16>,
    /// Duties the scope ring had no room for
    pub dropped: u64,
    /// Periods where the sampling handler overran the commit
    pub overruns: u64,
}
