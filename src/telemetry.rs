//! Logging setup shared by the binaries.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing::Level;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// No subscriber; the terminal front end uses this when no file is set,
    /// since stderr would scribble over the alternate screen.
    Off,
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("could not open log file: {0}")]
    Io(#[from] io::Error),

    #[error("could not install log subscriber: {0}")]
    Install(String),
}

pub fn init(level: Level, target: LogTarget) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(|e| TelemetryError::Install(e.to_string()))
}
