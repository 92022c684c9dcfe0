//! Terminal dashboard. Draws from a driver [`Snapshot`] and never mutates it.

mod analytics_drawer;
mod reactor_gauge;
pub mod responsive;
mod stats_panel;
mod throbber;

use crate::driver::Snapshot;
use crate::input::UiState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use responsive::{render_too_small, LayoutContext, SizeTier, DRAWER_ROWS};
use std::time::Instant;

pub fn draw_dashboard(frame: &mut Frame, snapshot: &Snapshot, ui: &UiState) {
    let ctx = LayoutContext::from_frame(frame);
    if ctx.tier == SizeTier::TooSmall {
        render_too_small(frame, &ctx);
        return;
    }

    let drawer_rows = if ui.show_analytics && ctx.fits_drawer() {
        DRAWER_ROWS
    } else {
        0
    };
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Min(0),              // Reactor columns
            Constraint::Length(drawer_rows), // Analytics drawer
            Constraint::Length(3),           // Footer
        ])
        .split(frame.size());

    draw_header(frame, v_chunks[0], snapshot, ui, ctx.tier);

    let state = &snapshot.state;
    let wave = ui.wave_progress(Instant::now());
    match ctx.tier {
        SizeTier::Full => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(24), // Stat cards
                    Constraint::Min(30),    // Reactor
                    Constraint::Length(36), // Evolution
                ])
                .split(v_chunks[1]);
            stats_panel::draw_stat_cards(frame, columns[0], state);
            reactor_gauge::draw_reactor(frame, columns[1], state, wave);
            stats_panel::draw_evolution_panel(frame, columns[2], state);
        }
        _ => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(26), Constraint::Length(34)])
                .split(v_chunks[1]);
            reactor_gauge::draw_reactor(frame, columns[0], state, wave);
            stats_panel::draw_evolution_panel(frame, columns[1], state);
        }
    }

    if drawer_rows > 0 {
        analytics_drawer::draw_analytics_drawer(
            frame,
            v_chunks[2],
            &snapshot.history,
            &snapshot.analytics,
        );
    }

    draw_footer(frame, v_chunks[3], ui);
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &Snapshot, ui: &UiState, tier: SizeTier) {
    let state = &snapshot.state;
    let mut spans = vec![
        Span::styled(
            "DEMON FUEL",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            if state.moonlight_mode {
                "☾ Moonlight"
            } else {
                "☀ Daylight"
            },
            Style::default().fg(if state.moonlight_mode {
                Color::LightBlue
            } else {
                Color::Yellow
            }),
        ),
    ];
    if tier < SizeTier::Full {
        // Stat cards are hidden in compact mode
        spans.push(Span::raw(format!(
            " | L{} | {} packs",
            state.level, state.blood_consumed
        )));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!(
            "Since {} | tick {}",
            ui.session_started.format("%H:%M"),
            snapshot.tick
        ),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Oni Energy Reactor"))
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, ui: &UiState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let mut spans = vec![
        key("[b]"),
        Span::raw(" Blood  "),
        key("[1/2/3]"),
        Span::raw(" Idle/Active/Combat  "),
        key("[m]"),
        Span::raw(" Moon  "),
        key("[tab]"),
        Span::raw(if ui.show_analytics {
            " Hide stats  "
        } else {
            " Stats  "
        }),
        key("[q]"),
        Span::raw(" Quit"),
    ];
    if let Some(notice) = &ui.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            notice.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
