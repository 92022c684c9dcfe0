//! Batch runner driving [`EnergySimulator`] directly, without timers.
//!
//! Statistics are tracked externally from each [`TickResult`] so the
//! numbers match what the live dashboard would have shown.

use super::config::{FeedPolicy, SimConfig};
use super::report::{RunStats, SimReport};
use crate::core::{EnergySimulator, SimulationState, TickResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Run every configured run and aggregate a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.runs as usize);
    if config.verbosity >= 1 {
        info!(
            runs = config.runs,
            ticks = config.ticks_per_run,
            "starting simulation"
        );
    }

    for run_idx in 0..config.runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                energy = stats.final_energy,
                level = stats.final_level,
                packs = stats.packs_consumed,
                rage = stats.rage_activations,
                "run finished"
            );
        }
        all_runs.push(stats);
    }

    let report = SimReport::from_runs(config.clone(), all_runs);
    if config.verbosity >= 1 {
        info!(
            depleted = report.runs_depleted,
            avg_packs = report.avg_packs_consumed,
            "simulation finished"
        );
    }
    report
}

/// Accumulates statistics from tick results during one run.
struct RunTracker {
    start: SimulationState,
    ticks_in_rage: u64,
    level_ups: u32,
    rage_entries: u32,
    min_energy: f64,
    depleted_at: Option<u64>,
}

impl RunTracker {
    fn new(start: SimulationState) -> Self {
        Self {
            start,
            ticks_in_rage: 0,
            level_ups: 0,
            rage_entries: 0,
            min_energy: start.energy,
            depleted_at: None,
        }
    }

    fn process(&mut self, result: &TickResult) {
        if result.entered_rage() {
            self.rage_entries += 1;
        }
        if result.leveled_up().is_some() {
            self.level_ups += 1;
        }
    }

    /// Called after each tick, before the feeding policy acts.
    fn observe_tick(&mut self, tick: u64, state: &SimulationState) {
        self.min_energy = self.min_energy.min(state.energy);
        if state.is_rage_mode() {
            self.ticks_in_rage += 1;
        }
        if state.energy <= 0.0 && self.depleted_at.is_none() {
            self.depleted_at = Some(tick);
        }
    }

    fn finish(self, end: &SimulationState, ticks: u64) -> RunStats {
        RunStats {
            total_ticks: ticks,
            final_energy: end.energy,
            final_level: end.level,
            final_xp: end.xp,
            packs_consumed: end.blood_consumed - self.start.blood_consumed,
            rage_activations: self.rage_entries,
            level_ups: self.level_ups,
            ticks_in_rage: self.ticks_in_rage,
            min_energy: self.min_energy,
            depleted_at: self.depleted_at,
        }
    }
}

fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> RunStats {
    let mut sim = EnergySimulator::new();
    sim.set_activity_level(config.activity);
    if config.moonlight {
        sim.toggle_moonlight();
    }

    let mut tracker = RunTracker::new(sim.snapshot());

    for tick in 1..=config.ticks_per_run {
        let result = sim.tick();
        tracker.process(&result);
        tracker.observe_tick(tick, sim.state());

        if should_feed(config.policy, sim.state(), rng) {
            let result = sim.consume_blood_pack();
            tracker.process(&result);
        }
    }

    tracker.finish(sim.state(), config.ticks_per_run)
}

fn should_feed(policy: FeedPolicy, state: &SimulationState, rng: &mut impl Rng) -> bool {
    match policy {
        FeedPolicy::Never => false,
        FeedPolicy::Threshold { below } => state.energy < below,
        FeedPolicy::Random { chance } => rng.gen_bool(feed_probability(chance)),
    }
}

/// Clamps to 0..=1; NaN and infinities never feed.
fn feed_probability(chance: f64) -> f64 {
    if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
