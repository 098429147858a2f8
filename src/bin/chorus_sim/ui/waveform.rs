//! Duty-cycle scope
//!
//! Plots the newest committed duties against time, with the silence line
//! (duty 127) drawn underneath. The vertical range follows the signal so a
//! quiet chorus still fills the panel.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use pwm_chorus::SAMPLE_MIDPOINT;

/// Smallest half-height of the plot, in level units (about 3 duty steps)
const MIN_SPAN: f64 = 3.0 / SAMPLE_MIDPOINT as f64;

/// Points and axis ranges for one scope frame.
struct ScopeView {
    trace: Vec<(f64, f64)>,
    silence: [(f64, f64); 2],
    window_ms: f64,
    span: f64,
}

impl ScopeView {
    fn from_levels(levels: &[f32], sample_rate_hz: f32) -> Self {
        let ms_per_period = 1000.0 / (sample_rate_hz as f64).max(1.0);
        let window_ms = levels.len() as f64 * ms_per_period;

        let peak = levels
            .iter()
            .fold(0.0f64, |acc, &level| acc.max((level as f64).abs()));
        let span = (peak * 1.1).clamp(MIN_SPAN, 1.0);

        Self {
            trace: levels
                .iter()
                .enumerate()
                .map(|(n, &level)| (n as f64 * ms_per_period, level as f64))
                .collect(),
            silence: [(0.0, 0.0), (window_ms, 0.0)],
            window_ms,
            span,
        }
    }

    /// Duty value at the top of the plot
    fn top_duty(&self) -> u8 {
        (SAMPLE_MIDPOINT as f64 * (1.0 + self.span)).round() as u8
    }

    /// Duty value at the bottom of the plot
    fn bottom_duty(&self) -> u8 {
        (SAMPLE_MIDPOINT as f64 * (1.0 - self.span)).round() as u8
    }
}

pub fn render_scope(frame: &mut Frame, area: Rect, levels: &[f32], sample_rate_hz: f32) {
    let view = ScopeView::from_levels(levels, sample_rate_hz);

    let datasets = vec![
        Dataset::default()
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(Color::DarkGray))
            .data(&view.silence),
        Dataset::default()
            .name("duty")
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::LightGreen))
            .data(&view.trace),
    ];

    let title = format!(
        " Scope  {:.1} ms  duty {}..{} ",
        view.window_ms,
        view.bottom_duty(),
        view.top_duty()
    );

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, view.window_ms.max(f64::EPSILON)])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0} ms", view.window_ms)),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-view.span, view.span])
                .labels(vec![
                    Span::raw(view.bottom_duty().to_string()),
                    Span::raw(SAMPLE_MIDPOINT.to_string()),
                    Span::raw(view.top_duty().to_string()),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
