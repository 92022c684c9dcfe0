//! Demon Fuel: a terminal oni energy reactor.
//!
//! The reactor core is a plain state machine in [`core`]. [`driver`] runs it
//! on a tokio timer and hands out snapshots; the `demon-fuel` binary draws
//! those with [`ui`], and the `simulate` binary runs the core headless via
//! [`simulator`].

pub mod build_info;
pub mod config;
pub mod core;
pub mod driver;
pub mod input;
pub mod simulator;
pub mod telemetry;
pub mod ui;
