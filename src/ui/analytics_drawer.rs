//! Bottom drawer: energy history sparkline and session summary.

use crate::core::analytics::{EnergySample, SessionAnalytics};
use crate::core::constants::MAX_ENERGY;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

pub fn draw_analytics_drawer(
    frame: &mut Frame,
    area: Rect,
    history: &[EnergySample],
    analytics: &SessionAnalytics,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(area);

    let data = sparkline_data(history, chunks[0].width.saturating_sub(2) as usize);
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Energy History ({} samples)", history.len())),
        )
        .data(&data)
        .max(MAX_ENERGY as u64)
        .style(Style::default().fg(Color::Magenta));
    frame.render_widget(sparkline, chunks[0]);

    draw_summary(frame, chunks[1], analytics);
}

fn draw_summary(frame: &mut Frame, area: Rect, analytics: &SessionAnalytics) {
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<14}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ])
    };
    let range = match (analytics.min_energy, analytics.max_energy) {
        (Some(min), Some(max)) => format!("{:.1}% - {:.1}%", min, max),
        _ => "--".to_string(),
    };
    let peak = analytics
        .peak_drain_tick
        .map_or_else(|| "--".to_string(), |tick| format!("tick {}", tick));

    let lines = vec![
        row("Avg drain", format!("{:.1}%/h", analytics.avg_drain_per_hour)),
        row("Peak drain", peak),
        row("Per pack", format!("+{:.0}%", analytics.recovery_per_pack)),
        row("Stability", format!("{:.1}", analytics.stability_score)),
        row("Range", range),
        row("Rage count", analytics.rage_activations.to_string()),
    ];
    let summary =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Session"));
    frame.render_widget(summary, area);
}

/// The newest `width` samples as whole percentages.
fn sparkline_data(history: &[EnergySample], width: usize) -> Vec<u64> {
    let skip = history.len().saturating_sub(width);
    history
        .iter()
        .skip(skip)
        .map(|s| s.energy.round().clamp(0.0, MAX_ENERGY) as u64)
        .collect()
}
