use crate::core::evolution::{abilities, next_unlock, unlocked_count, ABILITIES};
use crate::core::SimulationState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Left column: level, blood intake and stability cards.
pub fn draw_stat_cards(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Level
            Constraint::Length(4), // Blood consumed
            Constraint::Length(4), // Stability
            Constraint::Min(0),
        ])
        .split(area);

    draw_card(
        frame,
        chunks[0],
        "Demon Level",
        format!("{}", state.level),
        format!("{} abilities", unlocked_count(state.level)),
        Color::Magenta,
    );
    draw_card(
        frame,
        chunks[1],
        "Blood Consumed",
        format!("{}", state.blood_consumed),
        "packs".to_string(),
        Color::Red,
    );
    draw_card(
        frame,
        chunks[2],
        "Stability",
        format!("{:.1}", state.stability_index()),
        state.stability_band().label().to_string(),
        Color::Cyan,
    );
}

fn draw_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    caption: String,
    color: Color,
) {
    let text = vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(caption, Style::default().fg(Color::DarkGray))),
    ];
    let card = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);
    frame.render_widget(card, area);
}

/// Right column: ability ladder, rage activations and XP progress.
pub fn draw_evolution_panel(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ABILITIES.len() as u16 + 3), // Abilities + next unlock
            Constraint::Length(4),                          // Rage activations
            Constraint::Length(3),                          // XP bar
            Constraint::Min(0),
        ])
        .split(area);

    draw_abilities(frame, chunks[0], state);
    draw_card(
        frame,
        chunks[1],
        "Rage Activations",
        format!("{}", state.rage_activations),
        "this session".to_string(),
        Color::Red,
    );
    draw_xp(frame, chunks[2], state);
}

fn draw_abilities(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let mut lines: Vec<Line> = abilities(state.level)
        .into_iter()
        .map(|status| {
            let (marker, style) = if status.unlocked {
                ("✓", Style::default().fg(Color::Green))
            } else {
                ("·", Style::default().fg(Color::DarkGray))
            };
            Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(status.ability.name, style),
                Span::styled(
                    format!("  L{}", status.ability.required_level),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let next = match next_unlock(state.level) {
        Some(ability) => format!("Next: {} at L{}", ability.name, ability.required_level),
        None => "Fully evolved".to_string(),
    };
    lines.push(Line::from(Span::styled(
        next,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )));

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Evolution"));
    frame.render_widget(panel, area);
}

fn draw_xp(frame: &mut Frame, area: Rect, state: &SimulationState) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Evolution XP"))
        .gauge_style(Style::default().fg(Color::Yellow))
        .label(format!(
            "{}/{} ({} to go)",
            state.xp,
            state.xp_to_next(),
            state.xp_remaining()
        ))
        .ratio(state.xp_progress().clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}
