//! The energy simulator: decay, replenishment, leveling and rage tracking.
//!
//! One `EnergySimulator` owns one [`SimulationState`]. All mutation goes
//! through the methods here so the invariants hold after every call:
//! energy stays in 0..=100, xp stays below `XP_TO_NEXT`, and
//! `rage_activations` only moves on a falling edge across the threshold.

use crate::core::constants::*;
use crate::core::error::ReactorError;
use crate::core::state::{clamp_energy, is_rage_energy, ActivityLevel, SimulationState};
use crate::core::tick::{TickEvent, TickResult};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct EnergySimulator {
    state: SimulationState,
    ticks: u64,
}

impl Default for EnergySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergySimulator {
    /// Simulator with the fixed session-start values.
    pub fn new() -> Self {
        Self::from_state(SimulationState::new())
    }

    /// Simulator resumed from an arbitrary state, normalized into range.
    pub fn from_state(state: SimulationState) -> Self {
        Self {
            state: state.normalized(),
            ticks: 0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Copy of the current state for handing to readers.
    pub fn snapshot(&self) -> SimulationState {
        self.state
    }

    /// Ticks applied since this simulator was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Applies one period of decay, then checks the rage edge.
    pub fn tick(&mut self) -> TickResult {
        let previous = self.state.energy;
        let rate = self.state.drain_per_tick();
        self.state.energy = (previous - rate).max(MIN_ENERGY);
        self.ticks += 1;

        let mut result = TickResult::default();
        if let Some(event) = self.observe_rage_edge(previous, self.state.energy) {
            result.events.push(event);
        }
        result
    }

    /// Counts a rage activation when energy crosses the threshold downward.
    ///
    /// Staying below the threshold across ticks never counts again; only a
    /// transition from `>= RAGE_THRESHOLD` to `< RAGE_THRESHOLD` does.
    pub fn observe_rage_edge(&mut self, previous: f64, current: f64) -> Option<TickEvent> {
        if is_rage_energy(previous) || !is_rage_energy(current) {
            return None;
        }
        self.state.rage_activations += 1;
        debug!(
            energy = current,
            activations = self.state.rage_activations,
            "rage mode entered"
        );
        Some(TickEvent::RageEntered { energy: current })
    }

    /// Switches activity level; the new rate applies from the next tick.
    pub fn set_activity_level(&mut self, level: ActivityLevel) {
        if self.state.activity_level != level {
            debug!(from = %self.state.activity_level, to = %level, "activity level changed");
        }
        self.state.activity_level = level;
    }

    /// String entry point for callers that don't hold an `ActivityLevel`.
    /// Rejects unknown modes and leaves state untouched.
    pub fn set_activity_level_str(&mut self, mode: &str) -> Result<(), ReactorError> {
        let level = mode.parse::<ActivityLevel>()?;
        self.set_activity_level(level);
        Ok(())
    }

    /// Flips moonlight mode and returns the new value.
    pub fn toggle_moonlight(&mut self) -> bool {
        self.state.moonlight_mode = !self.state.moonlight_mode;
        debug!(moonlight = self.state.moonlight_mode, "moonlight toggled");
        self.state.moonlight_mode
    }

    /// Restores energy, bumps the intake counter and grants XP.
    ///
    /// `BLOOD_PACK_XP` is far below `XP_TO_NEXT`, so one call rolls over at
    /// most one level.
    pub fn consume_blood_pack(&mut self) -> TickResult {
        let energy_before = self.state.energy;
        self.state.energy = clamp_energy(energy_before + BLOOD_PACK_ENERGY);
        self.state.blood_consumed += 1;

        let mut result = TickResult::default();
        result.events.push(TickEvent::Replenished {
            energy_before,
            energy_after: self.state.energy,
        });

        let xp = self.state.xp + BLOOD_PACK_XP;
        if xp >= XP_TO_NEXT {
            self.state.level += 1;
            self.state.xp = xp - XP_TO_NEXT;
            debug!(level = self.state.level, "reactor leveled up");
            result.events.push(TickEvent::LeveledUp {
                new_level: self.state.level,
            });
        } else {
            self.state.xp = xp;
        }
        result
    }
}
