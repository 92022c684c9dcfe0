//! Events produced by reactor ticks and commands.
//!
//! The simulator never touches presentation types. It reports what happened
//! as a list of [`TickEvent`]s and the front end decides how to show them.

use serde::Serialize;

/// A single thing that happened during a tick or command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickEvent {
    /// Energy fell below the rage threshold on this tick.
    RageEntered { energy: f64 },

    /// A blood pack was consumed. Transient; carries no persistent state.
    Replenished { energy_before: f64, energy_after: f64 },

    /// XP rolled over into a new level.
    LeveledUp { new_level: u32 },
}

/// Result of one tick or command, events in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn entered_rage(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::RageEntered { .. }))
    }

    pub fn replenished(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::Replenished { .. }))
    }

    /// New level if this result contains a level-up.
    pub fn leveled_up(&self) -> Option<u32> {
        self.events.iter().find_map(|e| match e {
            TickEvent::LeveledUp { new_level } => Some(*new_level),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = TickResult::default();
        assert!(result.is_empty());
        assert!(!result.entered_rage());
        assert!(!result.replenished());
        assert_eq!(result.leveled_up(), None);
    }

    #[test]
    fn test_result_queries() {
        let result = TickResult {
            events: vec![
                TickEvent::Replenished {
                    energy_before: 10.0,
                    energy_after: 44.0,
                },
                TickEvent::LeveledUp { new_level: 6 },
            ],
        };
        assert!(result.replenished());
        assert!(!result.entered_rage());
        assert_eq!(result.leveled_up(), Some(6));
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&TickEvent::LeveledUp { new_level: 5 }).unwrap();
        assert_eq!(json, r#"{"kind":"leveled_up","new_level":5}"#);
    }
}
