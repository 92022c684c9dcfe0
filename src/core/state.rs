use crate::core::constants::*;
use crate::core::error::ReactorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-selected activity level. Picks the per-tick drain rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Idle,
    Active,
    Combat,
}

impl ActivityLevel {
    pub fn all() -> [ActivityLevel; 3] {
        [
            ActivityLevel::Idle,
            ActivityLevel::Active,
            ActivityLevel::Combat,
        ]
    }

    /// Energy lost per tick at this level, before the moonlight multiplier.
    pub fn drain_rate(self) -> f64 {
        match self {
            ActivityLevel::Idle => IDLE_DRAIN_RATE,
            ActivityLevel::Active => ACTIVE_DRAIN_RATE,
            ActivityLevel::Combat => COMBAT_DRAIN_RATE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActivityLevel::Idle => "idle",
            ActivityLevel::Active => "active",
            ActivityLevel::Combat => "combat",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityLevel {
    type Err = ReactorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(ActivityLevel::Idle),
            "active" => Ok(ActivityLevel::Active),
            "combat" => Ok(ActivityLevel::Combat),
            _ => Err(ReactorError::InvalidActivityMode(s.to_string())),
        }
    }
}

/// Subtext shown on the stability card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StabilityBand {
    Volatile,
    Stable,
}

impl StabilityBand {
    pub fn label(self) -> &'static str {
        match self {
            StabilityBand::Volatile => "⚠ Volatile",
            StabilityBand::Stable => "Stable",
        }
    }
}

/// The whole reactor state. Cheap to copy; readers get snapshots of this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Reactor charge, always within 0..=100
    pub energy: f64,
    pub activity_level: ActivityLevel,
    pub moonlight_mode: bool,
    /// Progression level, starts at 1 for a blank reactor
    pub level: u32,
    /// Progress within the current level, always below `XP_TO_NEXT`
    pub xp: u32,
    /// Lifetime blood packs consumed
    pub blood_consumed: u32,
    /// Falling-edge crossings of the rage threshold
    pub rage_activations: u32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    /// State at the start of a session.
    pub fn new() -> Self {
        Self {
            energy: INITIAL_ENERGY,
            activity_level: ActivityLevel::Idle,
            moonlight_mode: false,
            level: INITIAL_LEVEL,
            xp: INITIAL_XP,
            blood_consumed: INITIAL_BLOOD_CONSUMED,
            rage_activations: INITIAL_RAGE_ACTIVATIONS,
        }
    }

    /// Effective drain per tick after the moonlight multiplier.
    pub fn drain_per_tick(&self) -> f64 {
        let multiplier = if self.moonlight_mode {
            MOONLIGHT_MULTIPLIER
        } else {
            1.0
        };
        self.activity_level.drain_rate() * multiplier
    }

    pub fn is_rage_mode(&self) -> bool {
        is_rage_energy(self.energy)
    }

    /// Alias of [`Self::is_rage_mode`].
    pub fn is_low_energy(&self) -> bool {
        self.is_rage_mode()
    }

    pub fn is_high_energy(&self) -> bool {
        self.energy > HIGH_ENERGY_THRESHOLD
    }

    pub fn stability_index(&self) -> f64 {
        stability_index(self.energy)
    }

    pub fn stability_band(&self) -> StabilityBand {
        if self.stability_index() < VOLATILE_STABILITY_BELOW {
            StabilityBand::Volatile
        } else {
            StabilityBand::Stable
        }
    }

    pub fn xp_to_next(&self) -> u32 {
        XP_TO_NEXT
    }

    pub fn xp_remaining(&self) -> u32 {
        XP_TO_NEXT.saturating_sub(self.xp)
    }

    /// Fraction of the current level completed, in 0.0..1.0.
    pub fn xp_progress(&self) -> f64 {
        self.xp as f64 / XP_TO_NEXT as f64
    }

    /// Forces the record back inside its invariants.
    pub(crate) fn normalized(mut self) -> Self {
        self.energy = clamp_energy(self.energy);
        self.level = self.level.max(1);
        self.level += self.xp / XP_TO_NEXT;
        self.xp %= XP_TO_NEXT;
        self
    }
}

pub fn is_rage_energy(energy: f64) -> bool {
    energy < RAGE_THRESHOLD
}

/// Clamps to 0..=100. NaN collapses to empty.
pub fn clamp_energy(energy: f64) -> f64 {
    if energy.is_nan() {
        return MIN_ENERGY;
    }
    energy.clamp(MIN_ENERGY, MAX_ENERGY)
}

/// Energy / 10 rounded to one decimal, clamped to 0..=10.
pub fn stability_index(energy: f64) -> f64 {
    (energy.round() / 10.0).clamp(0.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SimulationState::new();
        assert_eq!(state.energy, 78.0);
        assert_eq!(state.level, 4);
        assert_eq!(state.xp, 340);
        assert_eq!(state.blood_consumed, 3);
        assert_eq!(state.rage_activations, 1);
        assert_eq!(state.activity_level, ActivityLevel::Idle);
        assert!(!state.moonlight_mode);
    }

    #[test]
    fn test_activity_level_parse() {
        assert_eq!("idle".parse::<ActivityLevel>(), Ok(ActivityLevel::Idle));
        assert_eq!("Active".parse::<ActivityLevel>(), Ok(ActivityLevel::Active));
        assert_eq!(" combat ".parse::<ActivityLevel>(), Ok(ActivityLevel::Combat));
        assert_eq!(
            "frenzy".parse::<ActivityLevel>(),
            Err(ReactorError::InvalidActivityMode("frenzy".to_string()))
        );
    }

    #[test]
    fn test_drain_per_tick() {
        let mut state = SimulationState::new();
        state.activity_level = ActivityLevel::Active;
        assert!((state.drain_per_tick() - 0.08).abs() < 1e-12);
        state.moonlight_mode = true;
        assert!((state.drain_per_tick() - 0.032).abs() < 1e-12);
    }

    #[test]
    fn test_stability_index_boundaries() {
        assert_eq!(stability_index(35.0), 3.5);
        assert_eq!(stability_index(100.0), 10.0);
        assert_eq!(stability_index(0.0), 0.0);
        assert_eq!(stability_index(78.0), 7.8);
        assert_eq!(stability_index(49.96), 5.0);
    }

    #[test]
    fn test_stability_band() {
        let mut state = SimulationState::new();
        state.energy = 39.0;
        assert_eq!(state.stability_band(), StabilityBand::Volatile);
        state.energy = 40.0;
        assert_eq!(state.stability_band(), StabilityBand::Stable);
    }

    #[test]
    fn test_derived_flags() {
        let mut state = SimulationState::new();
        state.energy = 24.9;
        assert!(state.is_rage_mode());
        assert!(state.is_low_energy());
        assert!(!state.is_high_energy());

        state.energy = 25.0;
        assert!(!state.is_rage_mode());

        state.energy = 75.1;
        assert!(state.is_high_energy());
        state.energy = 75.0;
        assert!(!state.is_high_energy());
    }

    #[test]
    fn test_xp_helpers() {
        let state = SimulationState::new();
        assert_eq!(state.xp_to_next(), 500);
        assert_eq!(state.xp_remaining(), 160);
        assert!((state.xp_progress() - 0.68).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_clamps_and_rolls_over() {
        let state = SimulationState {
            energy: 140.0,
            level: 0,
            xp: 1_050,
            ..SimulationState::new()
        }
        .normalized();
        assert_eq!(state.energy, 100.0);
        assert_eq!(state.level, 3);
        assert_eq!(state.xp, 50);
    }

    #[test]
    fn test_clamp_energy_nan() {
        assert_eq!(clamp_energy(f64::NAN), 0.0);
        assert_eq!(clamp_energy(-3.0), 0.0);
    }
}
