//! Session analytics for the drawer: an energy history and its summary.
//!
//! Nothing here outlives the process. The history is a bounded ring of
//! samples taken every `SAMPLE_EVERY_TICKS` ticks.

use crate::core::constants::{BLOOD_PACK_ENERGY, HISTORY_CAPACITY, SAMPLE_EVERY_TICKS};
use crate::core::state::{stability_index, SimulationState};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySample {
    pub tick: u64,
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyHistory {
    samples: VecDeque<EnergySample>,
    capacity: usize,
}

impl Default for EnergyHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records unconditionally, evicting the oldest sample when full.
    pub fn record(&mut self, tick: u64, energy: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(EnergySample { tick, energy });
    }

    /// Records only on sampling ticks. Returns whether a sample was taken.
    pub fn observe(&mut self, tick: u64, energy: f64) -> bool {
        if tick % SAMPLE_EVERY_TICKS != 0 {
            return false;
        }
        self.record(tick, energy);
        true
    }

    pub fn samples(&self) -> impl Iterator<Item = &EnergySample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Summary figures shown in the analytics drawer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionAnalytics {
    /// Mean decay while draining, in percent per hour
    pub avg_drain_per_hour: f64,
    /// Tick ending the steepest single-interval drop
    pub peak_drain_tick: Option<u64>,
    /// Energy restored by one pack, in percent
    pub recovery_per_pack: f64,
    /// Mean stability index across the history, one decimal
    pub stability_score: f64,
    pub min_energy: Option<f64>,
    pub max_energy: Option<f64>,
    pub rage_activations: u32,
}

impl SessionAnalytics {
    pub fn from_history(
        history: &EnergyHistory,
        state: &SimulationState,
        tick_interval: Duration,
    ) -> Self {
        let samples: Vec<&EnergySample> = history.samples().collect();

        let mut drained = 0.0;
        let mut peak: Option<(u64, f64)> = None;
        for pair in samples.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let drop = a.energy - b.energy;
            if drop <= 0.0 {
                continue;
            }
            drained += drop;
            let span = b.tick.saturating_sub(a.tick).max(1) as f64;
            let slope = drop / span;
            if peak.map_or(true, |(_, best)| slope > best) {
                peak = Some((b.tick, slope));
            }
        }

        let elapsed_hours = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => {
                let ticks = last.tick.saturating_sub(first.tick) as f64;
                ticks * tick_interval.as_secs_f64() / 3600.0
            }
            _ => 0.0,
        };
        let avg_drain_per_hour = if elapsed_hours > 0.0 {
            drained / elapsed_hours
        } else {
            0.0
        };

        let stability_score = if samples.is_empty() {
            state.stability_index()
        } else {
            let total: f64 = samples.iter().map(|s| stability_index(s.energy)).sum();
            round_one_decimal(total / samples.len() as f64)
        };

        let min_energy = samples.iter().map(|s| s.energy).reduce(f64::min);
        let max_energy = samples.iter().map(|s| s.energy).reduce(f64::max);

        Self {
            avg_drain_per_hour,
            peak_drain_tick: peak.map(|(tick, _)| tick),
            recovery_per_pack: BLOOD_PACK_ENERGY,
            stability_score,
            min_energy,
            max_energy,
            rage_activations: state.rage_activations,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
