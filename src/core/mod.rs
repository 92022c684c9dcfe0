//! Reactor core: state, transitions, events and derived views.

pub mod analytics;
pub mod constants;
pub mod error;
pub mod evolution;
pub mod simulator;
pub mod state;
pub mod tick;

pub use error::ReactorError;
pub use simulator::EnergySimulator;
pub use state::{ActivityLevel, SimulationState, StabilityBand};
pub use tick::{TickEvent, TickResult};
