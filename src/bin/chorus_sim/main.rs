//! chorus-sim - run the PWM chorus pipeline on the host
//!
//! Run with: cargo run --bin chorus-sim
//!
//! A biased test tone stands in for the analog input. The timers are replayed
//! by the periodic driver inside the audio callback, and the modulator's
//! average level goes to the sound card.

mod app;
mod signal;
mod ui;

use app::Simulator;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Offset well away from the midpoint so the DC blocker has work to do
    Simulator::new()
        .tone(110.0, 0.3)
        .tone(164.8, 0.2)
        .tone(220.0, 0.1)
        .bias(0.25)
        .run()
}
