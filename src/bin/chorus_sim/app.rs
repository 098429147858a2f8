//! Simulator - builder that wires the pipeline to the sound card and the TUI

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use pwm_chorus::{
    io::{
        converter::duty_to_level,
        monitor::MonitorTee,
        sim::{SimulatedAdc, SimulatedPwm},
    },
    Board, ClockConfig, PeriodicDriver, Pipeline, PipelineConfig,
};

use super::signal::TestSignal;
use super::ui::{UiApp, UiStateInit, UiStateUpdate};

/// Duties buffered between the audio callback and the scope (~1.7 s).
const SCOPE_RING_SIZE: usize = 1 << 16;
/// Pending UI state updates; only the newest one is shown.
const STATE_RING_SIZE: usize = 64;

/// Main application builder
pub struct Simulator {
    clock: ClockConfig,
    pipeline: PipelineConfig,
    signal: TestSignal,
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            clock: ClockConfig::default(),
            pipeline: PipelineConfig::default(),
            // Rate is fixed up in run() once the clock is validated
            signal: TestSignal::new(1.0),
        }
    }

    /// Add a sine partial to the analog input
    pub fn tone(mut self, freq: f32, amplitude: f32) -> Self {
        self.signal = self.signal.tone(freq, amplitude);
        self
    }

    /// Constant offset of the analog input, as a fraction of the converter range
    pub fn bias(mut self, bias: f32) -> Self {
        self.signal = self.signal.bias(bias);
        self
    }

    /// Run the simulator (takes over the terminal until 'q')
    pub fn run(self) -> EyreResult<()> {
        let clock = self
            .clock
            .validate()
            .wrap_err("invalid timer configuration")?;
        let sample_rate_hz = clock.sample_rate_hz();

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let device_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        println!("=== chorus-sim ===");
        println!("Sample rate: {:.1} Hz", sample_rate_hz);
        println!("PWM rate: {:.1} Hz", clock.pwm_hz());
        println!(
            "Commit at tick {} of {}",
            clock.commit_tick(),
            clock.sample_period_ticks()
        );
        println!("Effect: {:?}", self.pipeline.effect);
        println!("Output device: {} Hz, {} channels", device_rate, channels);
        println!();

        let init = UiStateInit {
            sample_rate_hz,
            pwm_hz: clock.pwm_hz(),
            commit_tick: clock.commit_tick(),
            sample_period_ticks: clock.sample_period_ticks(),
            device_rate,
            effect: self.pipeline.effect,
            chorus_period: self.pipeline.chorus_period,
        };

        let (tee, scope_rx) = MonitorTee::with_capacity(SimulatedPwm::new(), SCOPE_RING_SIZE);
        let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(STATE_RING_SIZE);

        let signal = self.signal.with_sample_rate(sample_rate_hz);
        let mut board = Board::new(
            Pipeline::from_config(&self.pipeline),
            SimulatedAdc::new(signal),
            tee,
        );
        let mut driver = PeriodicDriver::new(clock);

        // Sample periods per output frame; the modulator level is held between periods
        let periods_per_frame = sample_rate_hz as f64 / device_rate as f64;
        let mut pending_periods = 0.0f64;
        let mut overruns = 0u64;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    pending_periods += periods_per_frame;
                    while pending_periods >= 1.0 {
                        pending_periods -= 1.0;
                        if driver.run_period(&mut board).is_err() {
                            overruns += 1;
                        }
                    }

                    let level = duty_to_level(board.pwm.inner().active());
                    frame.fill(level);
                }

                // Full ring means the UI is behind; it only needs the newest state
                let _ = state_tx.push(UiStateUpdate {
                    periods: board.pipeline.periods(),
                    chorus_delay: board.pipeline.chorus_delay(),
                    dropped: board.pwm.dropped(),
                    overruns,
                });
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;

        stream.play()?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(scope_rx, state_rx, init).run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
