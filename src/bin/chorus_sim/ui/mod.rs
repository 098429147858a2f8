//! TUI module for chorus-sim
//!
//! Scope and spectrum of the modulator output plus the pipeline's timing state.

pub mod state;
mod spectrum;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use pwm_chorus::io::converter::duty_to_level;

pub use state::{UiStateInit, UiStateUpdate};

use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, OutputStats};
use waveform::render_scope;

/// Levels kept for the scope and the FFT
const VIS_BUFFER_SIZE: usize = 2048;

pub struct UiApp {
    /// Committed duties from the audio callback
    duty_rx: Consumer<u8>,
    /// State updates from the audio callback
    state_rx: Consumer<UiStateUpdate>,
    init: UiStateInit,
    current: UiStateUpdate,
    levels: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(duty_rx: Consumer<u8>, state_rx: Consumer<UiStateUpdate>, init: UiStateInit) -> Self {
        let spectrum = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, init.sample_rate_hz);
        Self {
            duty_rx,
            state_rx,
            init,
            current: UiStateUpdate::default(),
            levels: vec![0.0; VIS_BUFFER_SIZE],
            spectrum,
            should_quit: false,
        }
    }

    /// Run the UI event loop until 'q'
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_output();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain committed duties, keeping the newest VIS_BUFFER_SIZE levels
    fn poll_output(&mut self) {
        let available = self.duty_rx.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = self.duty_rx.read_chunk(available) {
            self.levels.extend(chunk.into_iter().map(duty_to_level));
        }
        if self.levels.len() > VIS_BUFFER_SIZE {
            let excess = self.levels.len() - VIS_BUFFER_SIZE;
            self.levels.drain(..excess);
        }
        self.spectrum.update(&self.levels);
    }

    /// Keep only the newest state
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current = state;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc = key {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Scope
                Constraint::Min(8),    // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = OutputStats::from_buffer(&self.levels);
        render_transport(frame, chunks[0], &self.init, &self.current, &stats);
        render_scope(frame, chunks[1], &self.levels, self.init.sample_rate_hz);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = Paragraph::new(format!(
            " [Q] Quit   effect: {:?}   output device: {:.0} Hz",
            self.init.effect, self.init.device_rate
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
