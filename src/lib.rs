pub mod dsp; // Filter, history ring and effects
pub mod engine; // Handlers, clock arithmetic and the periodic driver
pub mod io;

pub use dsp::{Effect, Sample};
pub use engine::{
    clock::{ClockConfig, SampleClock, TimingError},
    handoff::PendingOutput,
    pipeline::{Board, Pipeline, PipelineConfig},
    scheduler::{PeriodicDriver, TimerEvent, TimerHandlers},
};
pub use io::{AnalogInput, PwmOutput};

/// Capacity of the sample history ring. Must stay a power of two.
pub const HISTORY_LEN: usize = 128;
/// Sample periods between two steps of the chorus delay sweep.
pub const CHORUS_PERIOD: u16 = 200;
/// Leak shift of the DC blocker; the cutoff sits near `fs / (2π · 2^k)`.
pub const DC_LEAK_SHIFT: u8 = 4;

/// Midpoint of the 8-bit converter and of the duty range.
pub const SAMPLE_MIDPOINT: u8 = 0x7F;
pub const SAMPLE_MAX: i8 = 127;
pub const SAMPLE_MIN: i8 = -127;

pub const CPU_HZ: u32 = 20_000_000;
pub const PWM_TOP: u8 = 0xFF;
pub const SAMPLE_RATE_DIV: u16 = 2;
/// Ticks between the commit compare match and the end of the first PWM period.
pub const COMMIT_OFFSET: u8 = 40;
