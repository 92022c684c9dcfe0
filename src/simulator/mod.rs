//! Headless reactor simulator for batch analysis.
//!
//! Runs many accelerated sessions without timers to answer questions like:
//! - How long does a full drain take at each activity level?
//! - How often does rage trigger under a given feeding habit?
//! - How fast does evolution progress per hour of play?
//!
//! The runner drives [`EnergySimulator`](crate::core::EnergySimulator)
//! directly, so results match the live dashboard tick for tick.

mod config;
mod report;
mod runner;

pub use config::{FeedPolicy, SimConfig};
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
