//! Status bar widget - timing, chorus sweep and output stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{UiStateInit, UiStateUpdate};

/// Output statistics for display
pub struct OutputStats {
    pub peak: f32,
    pub rms: f32,
}

impl OutputStats {
    /// Compute stats from a buffer of levels
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the status bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    static_state: &UiStateInit,
    dynamic_state: &UiStateUpdate,
    stats: &OutputStats,
) {
    let block = Block::default()
        .title(" chorus-sim ")
        .borders(Borders::ALL);

    let elapsed = dynamic_state.periods as f64 / static_state.sample_rate_hz as f64;

    let sweep = match dynamic_state.chorus_delay {
        Some(delay) => format!("Delay: {:>3}/{}  ", delay, static_state.chorus_period),
        None => "Bypass  ".to_string(),
    };

    let health_color = if dynamic_state.overruns > 0 {
        Color::Red
    } else {
        Color::Green
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" fs {:.1}kHz  ", static_state.sample_rate_hz / 1000.0),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("PWM {:.1}kHz  ", static_state.pwm_hz / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "Commit @{}/{}  ",
                static_state.commit_tick, static_state.sample_period_ticks
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(sweep, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:.1}s  ", elapsed),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "Overruns: {}  Dropped: {}  ",
                dynamic_state.overruns, dynamic_state.dropped
            ),
            Style::default().fg(health_color),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
