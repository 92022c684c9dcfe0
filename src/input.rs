//! Key handling for the dashboard.
//!
//! Keys map to [`InputAction`]s. Reactor actions become driver [`Command`]s;
//! everything else only touches local UI state.

use crate::core::constants::REPLENISH_WAVE_MS;
use crate::core::{ActivityLevel, TickEvent};
use crate::driver::Command;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward to the driver.
    Reactor(Command),
    ToggleAnalytics,
    Quit,
}

/// Terminal-local view state that is not part of the reactor.
#[derive(Debug, Clone)]
pub struct UiState {
    pub show_analytics: bool,
    /// Latest reactor event or rejected command, shown in the footer
    pub notice: Option<String>,
    pub session_started: DateTime<Local>,
    wave_started: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            show_analytics: false,
            notice: None,
            session_started: Local::now(),
            wave_started: None,
        }
    }

    /// Reacts to a reactor event: replenishment restarts the wave.
    pub fn observe(&mut self, event: &TickEvent, now: Instant) {
        let notice = match *event {
            TickEvent::Replenished {
                energy_before,
                energy_after,
            } => {
                self.wave_started = Some(now);
                format!("Blood absorbed: {:.0}% -> {:.0}%", energy_before, energy_after)
            }
            TickEvent::RageEntered { energy } => format!("RAGE MODE at {:.1}%", energy),
            TickEvent::LeveledUp { new_level } => format!("Evolved to level {}", new_level),
        };
        self.notice = Some(notice);
    }

    /// Fraction of the replenish wave elapsed, or `None` once it has finished.
    pub fn wave_progress(&self, now: Instant) -> Option<f64> {
        let started = self.wave_started?;
        let total = Duration::from_millis(REPLENISH_WAVE_MS);
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= total {
            return None;
        }
        Some(elapsed.as_secs_f64() / total.as_secs_f64())
    }
}

pub fn map_key(key: KeyEvent) -> Option<InputAction> {
    // Windows terminals report releases too.
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputAction::Quit);
    }

    let action = match key.code {
        KeyCode::Char('b') | KeyCode::Char('B') => {
            InputAction::Reactor(Command::ConsumeBloodPack)
        }
        KeyCode::Char('1') | KeyCode::Char('i') => {
            InputAction::Reactor(Command::SetActivity(ActivityLevel::Idle))
        }
        KeyCode::Char('2') | KeyCode::Char('a') => {
            InputAction::Reactor(Command::SetActivity(ActivityLevel::Active))
        }
        KeyCode::Char('3') | KeyCode::Char('c') => {
            InputAction::Reactor(Command::SetActivity(ActivityLevel::Combat))
        }
        KeyCode::Char('m') | KeyCode::Char('M') => InputAction::Reactor(Command::ToggleMoonlight),
        KeyCode::Tab => InputAction::ToggleAnalytics,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_reactor_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char('b'))),
            Some(InputAction::Reactor(Command::ConsumeBloodPack))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('m'))),
            Some(InputAction::Reactor(Command::ToggleMoonlight))
        );
    }

    #[test]
    fn test_activity_keys() {
        for (key, level) in [
            ('1', ActivityLevel::Idle),
            ('i', ActivityLevel::Idle),
            ('2', ActivityLevel::Active),
            ('a', ActivityLevel::Active),
            ('3', ActivityLevel::Combat),
            ('c', ActivityLevel::Combat),
        ] {
            assert_eq!(
                map_key(press(KeyCode::Char(key))),
                Some(InputAction::Reactor(Command::SetActivity(level))),
                "key {key}"
            );
        }
    }

    #[test]
    fn test_ui_keys() {
        assert_eq!(map_key(press(KeyCode::Tab)), Some(InputAction::ToggleAnalytics));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(InputAction::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(InputAction::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputAction::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_wave_runs_for_fixed_duration() {
        let mut ui = UiState::new();
        let start = Instant::now();
        assert_eq!(ui.wave_progress(start), None);

        ui.observe(
            &TickEvent::Replenished {
                energy_before: 40.0,
                energy_after: 74.0,
            },
            start,
        );
        assert_eq!(ui.wave_progress(start), Some(0.0));
        let halfway = ui.wave_progress(start + Duration::from_millis(400)).unwrap();
        assert!((halfway - 0.5).abs() < 1e-9);
        assert_eq!(
            ui.wave_progress(start + Duration::from_millis(REPLENISH_WAVE_MS)),
            None
        );
        assert!(ui.notice.as_deref().unwrap().contains("74%"));
    }

    #[test]
    fn test_other_events_leave_wave_alone() {
        let mut ui = UiState::new();
        let now = Instant::now();
        ui.observe(&TickEvent::RageEntered { energy: 24.9 }, now);
        assert_eq!(ui.wave_progress(now), None);
        assert_eq!(ui.notice.as_deref(), Some("RAGE MODE at 24.9%"));
        ui.observe(&TickEvent::LeveledUp { new_level: 5 }, now);
        assert_eq!(ui.notice.as_deref(), Some("Evolved to level 5"));
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Char('b'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
