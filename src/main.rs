use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use demon_fuel::build_info;
use demon_fuel::config::Config;
use demon_fuel::core::{EnergySimulator, ReactorError};
use demon_fuel::driver::{self, ReactorHandle};
use demon_fuel::input::{map_key, InputAction, UiState};
use demon_fuel::telemetry::{self, LogTarget};
use demon_fuel::ui::draw_dashboard;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "demon-fuel", about = "Oni energy reactor for the terminal")]
struct Args {
    /// Decay timer period in milliseconds (10..=10000)
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,

    /// Print version information and exit
    #[arg(short = 'V', long)]
    version: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(ms) = args.tick_ms {
        config.tick_interval_ms = ms;
    }
    if let Some(path) = &args.log_file {
        config.log_file = Some(path.clone());
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    let config = load_config(&args).context("loading configuration")?;
    let target = match &config.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Off,
    };
    telemetry::init(config.log_level()?, target).context("installing logger")?;
    info!(version = %build_info::version_line(), "starting");

    let runtime = Runtime::new().context("starting async runtime")?;
    let handle = runtime.block_on(async {
        driver::spawn(EnergySimulator::new(), config.tick_interval())
    });

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            runtime.block_on(handle.shutdown());
            return Err(e).context("preparing terminal");
        }
    };
    let outcome = run_dashboard(&mut terminal, &handle, config.frame_poll());
    let restored = restore_terminal(&mut terminal);

    // Stop the timer before reporting anything.
    if let Some(sim) = runtime.block_on(handle.shutdown()) {
        info!(ticks = sim.ticks(), energy = sim.state().energy, "session ended");
    }

    outcome?;
    restored.context("restoring terminal")?;
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    enter_or_rollback(
        || {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = io::stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

/// Runs `enter`; if it fails, runs `rollback` before handing back the error.
fn enter_or_rollback<T>(
    enter: impl FnOnce() -> io::Result<T>,
    rollback: impl FnOnce(),
) -> io::Result<T> {
    let entered = enter();
    if entered.is_err() {
        rollback();
    }
    entered
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn run_dashboard(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    handle: &ReactorHandle,
    frame_poll: Duration,
) -> Result<()> {
    let mut ui = UiState::new();
    let mut events = handle.subscribe_events();

    loop {
        loop {
            match events.try_recv() {
                Ok(event) => ui.observe(&event, Instant::now()),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "dashboard fell behind on reactor events");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        let snapshot = handle.snapshot();
        terminal.draw(|frame| draw_dashboard(frame, &snapshot, &ui))?;

        if !event::poll(frame_poll)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match map_key(key) {
            Some(InputAction::Reactor(command)) => match handle.try_send(command) {
                Ok(()) => {}
                Err(ReactorError::Busy) => {
                    ui.notice = Some("Reactor busy, try again".to_string());
                }
                Err(e) => return Err(e).context("sending command to reactor"),
            },
            Some(InputAction::ToggleAnalytics) => ui.show_analytics = !ui.show_analytics,
            Some(InputAction::Quit) => return Ok(()),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["demon-fuel", "--tick-ms", "250", "--log-level", "debug"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_out_of_range_tick_rejected() {
        let args = Args::parse_from(["demon-fuel", "--tick-ms", "5"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_failed_setup_rolls_back() {
        let mut rolled_back = false;
        let result: io::Result<()> = enter_or_rollback(
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || rolled_back = true,
        );
        assert!(result.is_err());
        assert!(rolled_back);

        let mut rolled_back = false;
        let result = enter_or_rollback(|| Ok(7), || rolled_back = true);
        assert_eq!(result.unwrap(), 7);
        assert!(!rolled_back);
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::parse_from(["demon-fuel", "--config", "/nonexistent/demon-fuel.json"]);
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("could not read config"));
    }
}
