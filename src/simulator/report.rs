//! Simulation report generation.

use super::config::{FeedPolicy, SimConfig};
use serde::Serialize;

/// Statistics for a single run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub total_ticks: u64,
    pub final_energy: f64,
    pub final_level: u32,
    pub final_xp: u32,
    pub packs_consumed: u32,
    pub rage_activations: u32,
    pub level_ups: u32,
    pub ticks_in_rage: u64,
    pub min_energy: f64,
    /// First tick energy hit zero, if it ever did
    pub depleted_at: Option<u64>,
}

/// Aggregated results from multiple runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub config: SimConfig,
    pub num_runs: u32,
    pub runs_depleted: u32,

    pub avg_final_energy: f64,
    pub avg_final_level: f64,
    pub avg_packs_consumed: f64,
    pub avg_rage_activations: f64,
    pub avg_level_ups: f64,
    /// Share of all ticks spent below the rage threshold, 0.0..=1.0
    pub rage_time_fraction: f64,
    pub lowest_energy: f64,

    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(config: SimConfig, runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs.max(1) as f64;
        let avg = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / n;

        let total_ticks: u64 = runs.iter().map(|r| r.total_ticks).sum();
        let rage_ticks: u64 = runs.iter().map(|r| r.ticks_in_rage).sum();
        let rage_time_fraction = if total_ticks > 0 {
            rage_ticks as f64 / total_ticks as f64
        } else {
            0.0
        };

        Self {
            num_runs,
            runs_depleted: runs.iter().filter(|r| r.depleted_at.is_some()).count() as u32,
            avg_final_energy: avg(|r| r.final_energy),
            avg_final_level: avg(|r| r.final_level as f64),
            avg_packs_consumed: avg(|r| r.packs_consumed as f64),
            avg_rage_activations: avg(|r| r.rage_activations as f64),
            avg_level_ups: avg(|r| r.level_ups as f64),
            rage_time_fraction,
            lowest_energy: runs
                .iter()
                .map(|r| r.min_energy)
                .reduce(f64::min)
                .unwrap_or(0.0),
            config,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 REACTOR SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} depleted\n",
            self.num_runs, self.runs_depleted
        ));
        report.push_str(&format!(
            "Activity: {}{}, {} ticks per run, policy: {}\n\n",
            self.config.activity,
            if self.config.moonlight { " (moonlight)" } else { "" },
            self.config.ticks_per_run,
            describe_policy(self.config.policy)
        ));

        report.push_str("── ENERGY ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Energy:    {:.2}\n",
            self.avg_final_energy
        ));
        report.push_str(&format!("  Lowest Energy:       {:.2}\n", self.lowest_energy));
        report.push_str(&format!(
            "  Time in Rage:        {:.1}%\n\n",
            self.rage_time_fraction * 100.0
        ));

        report.push_str("── INTAKE & EVOLUTION ───────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Packs Consumed:  {:.1}\n",
            self.avg_packs_consumed
        ));
        report.push_str(&format!("  Avg Level-ups:       {:.2}\n", self.avg_level_ups));
        report.push_str(&format!(
            "  Avg Final Level:     {:.2}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Rage Activations:{:>6.2}\n",
            self.avg_rage_activations
        ));

        report
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn describe_policy(policy: FeedPolicy) -> String {
    match policy {
        FeedPolicy::Never => "never feed".to_string(),
        FeedPolicy::Threshold { below } => format!("feed below {:.0}%", below),
        FeedPolicy::Random { chance } => format!("feed at random ({:.3}/tick)", chance),
    }
}
