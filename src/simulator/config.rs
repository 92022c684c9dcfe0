//! Headless simulation configuration.

use crate::core::ActivityLevel;
use serde::Serialize;

/// When the simulated player drinks a blood pack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedPolicy {
    /// Never replenish; energy drains to zero.
    Never,
    /// Consume whenever energy drops below `below` after a tick.
    Threshold { below: f64 },
    /// Consume with probability `chance` after each tick.
    Random { chance: f64 },
}

/// Configuration for a batch of headless runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    /// Number of independent runs
    pub runs: u32,

    /// Ticks simulated per run
    pub ticks_per_run: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    pub policy: FeedPolicy,

    /// Activity level held for the whole run
    pub activity: ActivityLevel,

    pub moonlight: bool,

    /// Log verbosity (0 = silent, 1 = start and finish, 2 = also each run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            // One hour at the default 100ms tick
            ticks_per_run: 36_000,
            seed: None,
            policy: FeedPolicy::Threshold { below: 30.0 },
            activity: ActivityLevel::Active,
            moonlight: false,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Single combat run with no feeding, for timing a full drain.
    pub fn drain_test(activity: ActivityLevel) -> Self {
        Self {
            runs: 1,
            ticks_per_run: 10_000,
            policy: FeedPolicy::Never,
            activity,
            ..Default::default()
        }
    }
}
