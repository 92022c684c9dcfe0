//! Center column: the energy reactor gauge.

use super::throbber::{blink_on, pulse_char, wave_line};
use crate::core::constants::MAX_ENERGY;
use crate::core::{SimulationState, StabilityBand};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn draw_reactor(frame: &mut Frame, area: Rect, state: &SimulationState, wave: Option<f64>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(state)))
        .title(" Reactor Core ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Drain status
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Gauge
            Constraint::Length(1), // Rage warning or replenish wave
            Constraint::Min(0),    // Stability
        ])
        .split(inner);

    draw_drain_status(frame, chunks[0], state);
    draw_gauge(frame, chunks[2], state);

    if let Some(progress) = wave {
        let wave = Paragraph::new(Span::styled(
            wave_line(progress, chunks[3].width as usize),
            Style::default().fg(Color::Magenta),
        ));
        frame.render_widget(wave, chunks[3]);
    } else if state.is_rage_mode() {
        draw_rage_warning(frame, chunks[3]);
    }

    draw_stability(frame, chunks[4], state);
}

fn draw_drain_status(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let mut spans = vec![
        Span::styled(
            state.activity_level.name().to_uppercase(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  -{:.3}%/tick", state.drain_per_tick())),
    ];
    if state.moonlight_mode {
        spans.push(Span::styled(
            "  ☾ moonlight",
            Style::default().fg(Color::LightBlue),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn draw_gauge(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Demon Energy"))
        .gauge_style(
            Style::default()
                .fg(energy_color(state))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("{:.1}%", state.energy))
        .ratio((state.energy / MAX_ENERGY).clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}

fn draw_rage_warning(frame: &mut Frame, area: Rect) {
    let style = if blink_on() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let pulse = pulse_char();
    let warning = Paragraph::new(Span::styled(
        format!("{pulse} RAGE MODE: feed the reactor {pulse}"),
        style,
    ))
    .alignment(Alignment::Center);
    frame.render_widget(warning, area);
}

fn draw_stability(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let band = state.stability_band();
    let band_style = match band {
        StabilityBand::Volatile => Style::default().fg(Color::Yellow),
        StabilityBand::Stable => Style::default().fg(Color::Green),
    };
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Stability "),
            Span::styled(
                format!("{:.1}", state.stability_index()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" / 10  "),
            Span::styled(band.label(), band_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

pub(super) fn energy_color(state: &SimulationState) -> Color {
    if state.is_rage_mode() {
        Color::Red
    } else if state.stability_band() == StabilityBand::Volatile {
        Color::Yellow
    } else if state.is_high_energy() {
        Color::Green
    } else {
        Color::Cyan
    }
}

fn border_color(state: &SimulationState) -> Color {
    if state.is_rage_mode() {
        Color::Red
    } else if state.moonlight_mode {
        Color::LightBlue
    } else {
        Color::DarkGray
    }
}
