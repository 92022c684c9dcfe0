//! Async driver: the single owner of the simulator.
//!
//! [`spawn`] moves an [`EnergySimulator`] into a tokio task that runs the
//! decay timer and applies [`Command`]s in arrival order. Nothing else ever
//! holds a mutable reference to the state. Readers get [`Snapshot`]s through
//! a `watch` channel and tick events through a `broadcast` channel.
//!
//! The timer stops when [`ReactorHandle::shutdown`] is called or the handle
//! is dropped, whichever comes first.

use crate::core::analytics::{EnergyHistory, EnergySample, SessionAnalytics};
use crate::core::constants::{COMMAND_CHANNEL_CAPACITY, EVENT_CHANNEL_CAPACITY};
use crate::core::{
    ActivityLevel, EnergySimulator, ReactorError, SimulationState, TickEvent, TickResult,
};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// A discrete user action, applied atomically by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetActivity(ActivityLevel),
    ToggleMoonlight,
    ConsumeBloodPack,
}

/// Read-only view published after every tick and command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: SimulationState,
    /// Ticks applied so far
    pub tick: u64,
    pub analytics: SessionAnalytics,
    pub history: Vec<EnergySample>,
}

impl Snapshot {
    fn capture(sim: &EnergySimulator, history: &EnergyHistory, tick_interval: Duration) -> Self {
        Self {
            state: sim.snapshot(),
            tick: sim.ticks(),
            analytics: SessionAnalytics::from_history(history, sim.state(), tick_interval),
            history: history.samples().copied().collect(),
        }
    }
}

/// Cloneable sending side of the command channel.
#[derive(Debug, Clone)]
pub struct Commander {
    tx: mpsc::Sender<Command>,
}

impl Commander {
    pub async fn send(&self, command: Command) -> Result<(), ReactorError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| ReactorError::DriverClosed)
    }

    /// Non-blocking send for synchronous callers such as the terminal loop.
    pub fn try_send(&self, command: Command) -> Result<(), ReactorError> {
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => ReactorError::Busy,
            TrySendError::Closed(_) => ReactorError::DriverClosed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owner-side handle to a running driver.
#[derive(Debug)]
pub struct ReactorHandle {
    commander: Commander,
    snapshots: watch::Receiver<Snapshot>,
    events: broadcast::Sender<TickEvent>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<EnergySimulator>,
}

impl ReactorHandle {
    /// Copy of the latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TickEvent> {
        self.events.subscribe()
    }

    pub fn commander(&self) -> Commander {
        self.commander.clone()
    }

    pub async fn send(&self, command: Command) -> Result<(), ReactorError> {
        self.commander.send(command).await
    }

    pub fn try_send(&self, command: Command) -> Result<(), ReactorError> {
        self.commander.try_send(command)
    }

    /// Cancels the timer and waits for the task. Returns the final simulator,
    /// or `None` if the task panicked.
    pub async fn shutdown(self) -> Option<EnergySimulator> {
        let _ = self.shutdown.send(());
        self.task.await.ok()
    }
}

/// Starts the driver on the current tokio runtime.
pub fn spawn(simulator: EnergySimulator, tick_interval: Duration) -> ReactorHandle {
    let mut history = EnergyHistory::new();
    history.observe(simulator.ticks(), simulator.state().energy);

    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) =
        watch::channel(Snapshot::capture(&simulator, &history, tick_interval));
    let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let driver = Driver {
        simulator,
        history,
        tick_interval,
        commands: command_rx,
        snapshots: snapshot_tx,
        events: event_tx.clone(),
    };
    let task = tokio::spawn(driver.run(shutdown_rx));

    ReactorHandle {
        commander: Commander { tx: command_tx },
        snapshots: snapshot_rx,
        events: event_tx,
        shutdown: shutdown_tx,
        task,
    }
}

struct Driver {
    simulator: EnergySimulator,
    history: EnergyHistory,
    tick_interval: Duration,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Snapshot>,
    events: broadcast::Sender<TickEvent>,
}

impl Driver {
    async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> EnergySimulator {
        let start = Instant::now() + self.tick_interval;
        let mut interval = time::interval_at(start, self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            interval_ms = self.tick_interval.as_millis() as u64,
            "reactor driver started"
        );

        loop {
            let result = tokio::select! {
                biased;
                // Fires on explicit shutdown and when the handle is dropped.
                _ = &mut shutdown => break,
                command = self.commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                _ = interval.tick() => {
                    let result = self.simulator.tick();
                    self.history.observe(self.simulator.ticks(), self.simulator.state().energy);
                    result
                }
            };
            self.publish(result);
        }

        // Commands queued before shutdown still land.
        self.commands.close();
        while let Ok(command) = self.commands.try_recv() {
            let result = self.apply(command);
            self.publish(result);
        }

        info!(ticks = self.simulator.ticks(), "reactor driver stopped");
        self.simulator
    }

    fn apply(&mut self, command: Command) -> TickResult {
        debug!(?command, "applying command");
        match command {
            Command::SetActivity(level) => {
                self.simulator.set_activity_level(level);
                TickResult::default()
            }
            Command::ToggleMoonlight => {
                self.simulator.toggle_moonlight();
                TickResult::default()
            }
            Command::ConsumeBloodPack => self.simulator.consume_blood_pack(),
        }
    }

    fn publish(&self, result: TickResult) {
        for event in result.events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        self.snapshots.send_replace(Snapshot::capture(
            &self.simulator,
            &self.history,
            self.tick_interval,
        ));
    }
}
