//! Error types for the reactor core and its driver.

use thiserror::Error;

/// Errors surfaced by the reactor API.
///
/// Every simulator operation is total over its typed inputs, so the only
/// failures are untyped input at the boundary and talking to a driver that
/// has already stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactorError {
    /// Activity level string outside `idle`, `active`, `combat`.
    #[error("invalid activity mode: {0:?} (expected idle, active or combat)")]
    InvalidActivityMode(String),

    /// The driver task has shut down and no longer accepts commands.
    #[error("reactor driver is no longer running")]
    DriverClosed,

    /// The driver's command queue is full; the command was dropped.
    #[error("reactor command queue is full")]
    Busy,
}
