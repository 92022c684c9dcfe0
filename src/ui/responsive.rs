//! Terminal size classification.
//!
//! A `LayoutContext` is built once per frame and decides which dashboard
//! layout fits.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeTier {
    TooSmall,
    /// Gauge and evolution panel only; stat cards fold into the header
    Compact, // 60x20+
    /// Three columns
    Full, // 100x28+
}

const FULL_MIN_COLS: u16 = 100;
const FULL_MIN_ROWS: u16 = 28;
const COMPACT_MIN_COLS: u16 = 60;
const COMPACT_MIN_ROWS: u16 = 20;

/// Rows the analytics drawer needs on top of the base layout.
pub const DRAWER_ROWS: u16 = 12;

#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    /// min(width tier, height tier)
    pub tier: SizeTier,
    pub cols: u16,
    pub rows: u16,
}

impl LayoutContext {
    pub fn from_frame(frame: &Frame) -> Self {
        let size = frame.size();
        Self::from_size(size.width, size.height)
    }

    pub fn from_size(cols: u16, rows: u16) -> Self {
        let width_tier = classify(cols, FULL_MIN_COLS, COMPACT_MIN_COLS);
        let height_tier = classify(rows, FULL_MIN_ROWS, COMPACT_MIN_ROWS);
        LayoutContext {
            tier: width_tier.min(height_tier),
            cols,
            rows,
        }
    }

    /// The drawer only opens when the base layout keeps its minimum height.
    pub fn fits_drawer(&self) -> bool {
        self.rows >= COMPACT_MIN_ROWS + DRAWER_ROWS
    }
}

fn classify(val: u16, full: u16, compact: u16) -> SizeTier {
    if val >= full {
        SizeTier::Full
    } else if val >= compact {
        SizeTier::Compact
    } else {
        SizeTier::TooSmall
    }
}

pub fn render_too_small(frame: &mut Frame, ctx: &LayoutContext) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Reactor view needs more room",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Need: {}x{}   Have: {}x{}",
                COMPACT_MIN_COLS, COMPACT_MIN_ROWS, ctx.cols, ctx.rows
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Resize the terminal or press q to quit.",
            Style::default().fg(Color::White),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full() {
        assert_eq!(LayoutContext::from_size(120, 40).tier, SizeTier::Full);
        assert_eq!(LayoutContext::from_size(100, 28).tier, SizeTier::Full);
    }

    #[test]
    fn test_compact() {
        assert_eq!(LayoutContext::from_size(99, 40).tier, SizeTier::Compact);
        assert_eq!(LayoutContext::from_size(140, 27).tier, SizeTier::Compact);
        assert_eq!(LayoutContext::from_size(60, 20).tier, SizeTier::Compact);
    }

    #[test]
    fn test_too_small() {
        assert_eq!(LayoutContext::from_size(59, 30).tier, SizeTier::TooSmall);
        assert_eq!(LayoutContext::from_size(120, 19).tier, SizeTier::TooSmall);
        assert_eq!(LayoutContext::from_size(0, 0).tier, SizeTier::TooSmall);
    }

    #[test]
    fn test_drawer_fit() {
        assert!(LayoutContext::from_size(100, 32).fits_drawer());
        assert!(!LayoutContext::from_size(100, 31).fits_drawer());
    }
}
