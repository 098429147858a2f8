//! Spectrum widget
//!
//! FFT of the modulator level. The chorus shows up as a moving comb: the four
//! taps cancel at frequencies that drift as the delay offset sweeps.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Points plotted across the band
const DISPLAY_POINTS: usize = 96;
/// Floor of the magnitude axis
const FLOOR_DB: f64 = -90.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// (frequency_hz, magnitude_db), linearly spaced up to Nyquist
    points: Vec<(f64, f64)>,
    bin_hz: f64,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        // Hann window
        let denom = (fft_len - 1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let bin_hz = sample_rate as f64 / fft_len as f64;
        let points = (0..DISPLAY_POINTS)
            .map(|p| (Self::point_bin(p, fft_len) as f64 * bin_hz, FLOOR_DB))
            .collect();

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            points,
            bin_hz,
        }
    }

    fn point_bin(point: usize, fft_len: usize) -> usize {
        let half = fft_len / 2;
        (point * half / DISPLAY_POINTS).min(half - 1)
    }

    /// Recompute from the newest `fft_len` levels. Shorter buffers are ignored.
    pub fn update(&mut self, levels: &[f32]) {
        let len = self.window.len();
        if levels.len() < len {
            return;
        }
        let recent = &levels[levels.len() - len..];

        for ((slot, &level), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *slot = Complex::new(level * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // Peak bin within each display slice so narrow notches stay visible
        let step = (len / 2 / DISPLAY_POINTS).max(1);
        for (p, point) in self.points.iter_mut().enumerate() {
            let start = Self::point_bin(p, len);
            let end = (start + step).min(len / 2);
            let power = self.scratch[start..end]
                .iter()
                .map(|c| c.norm_sqr())
                .fold(1e-12f32, f32::max);
            *point = (start as f64 * self.bin_hz, (10.0 * (power as f64).log10()).max(FLOOR_DB));
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Render the spectrum chart
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum ")
        .borders(Borders::ALL);

    let max_freq = spectrum.last().map(|(f, _)| *f).unwrap_or(1.0).max(1.0);
    let max_db = spectrum
        .iter()
        .map(|(_, db)| *db)
        .fold(FLOOR_DB, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec![
                    "0".to_string(),
                    format!("{:.1}k", max_freq / 2000.0),
                    format!("{:.1}k", max_freq / 1000.0),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-90", "-45", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
