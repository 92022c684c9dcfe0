//! Driver behavior under paused tokio time.

use demon_fuel::core::constants::{IDLE_DRAIN_RATE, INITIAL_ENERGY};
use demon_fuel::core::{
    ActivityLevel, EnergySimulator, ReactorError, SimulationState, TickEvent,
};
use demon_fuel::driver::{self, Command, Snapshot};
use std::time::Duration;
use tokio::sync::watch;

const TICK: Duration = Duration::from_millis(100);

async fn wait_for(rx: &mut watch::Receiver<Snapshot>, done: impl Fn(&Snapshot) -> bool) -> Snapshot {
    loop {
        {
            let snapshot = rx.borrow_and_update();
            if done(&snapshot) {
                return snapshot.clone();
            }
        }
        rx.changed().await.expect("driver stopped early");
    }
}

#[tokio::test(start_paused = true)]
async fn test_ticks_decay_energy() {
    let handle = driver::spawn(EnergySimulator::new(), TICK);
    let mut rx = handle.subscribe_snapshots();

    let snapshot = wait_for(&mut rx, |s| s.tick >= 10).await;
    let expected = INITIAL_ENERGY - snapshot.tick as f64 * IDLE_DRAIN_RATE;
    assert!((snapshot.state.energy - expected).abs() < 1e-9);
    // Sampled at tick 0 and every 10th tick after
    assert_eq!(snapshot.history.len(), 2);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_no_tick_before_first_period() {
    let handle = driver::spawn(EnergySimulator::new(), TICK);
    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    assert_eq!(handle.snapshot().tick, 0);
    assert_eq!(handle.snapshot().state.energy, INITIAL_ENERGY);
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_commands_visible_in_snapshots() {
    let handle = driver::spawn(EnergySimulator::new(), Duration::from_secs(60));
    let mut rx = handle.subscribe_snapshots();

    handle
        .send(Command::SetActivity(ActivityLevel::Combat))
        .await
        .unwrap();
    handle.send(Command::ToggleMoonlight).await.unwrap();
    handle.send(Command::ConsumeBloodPack).await.unwrap();

    let snapshot = wait_for(&mut rx, |s| s.state.blood_consumed == 4).await;
    assert_eq!(snapshot.state.activity_level, ActivityLevel::Combat);
    assert!(snapshot.state.moonlight_mode);
    assert_eq!(snapshot.state.energy, 100.0);
    assert_eq!(snapshot.state.xp, 365);
    assert_eq!(snapshot.tick, 0);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_events_broadcast() {
    let start = SimulationState {
        energy: 25.1,
        activity_level: ActivityLevel::Combat,
        ..SimulationState::new()
    };
    let handle = driver::spawn(EnergySimulator::from_state(start), TICK);
    let mut events = handle.subscribe_events();

    match events.recv().await.unwrap() {
        TickEvent::RageEntered { energy } => assert!(energy < 25.0),
        other => panic!("expected rage, got {other:?}"),
    }

    handle.send(Command::ConsumeBloodPack).await.unwrap();
    match events.recv().await.unwrap() {
        TickEvent::Replenished {
            energy_before,
            energy_after,
        } => assert!((energy_after - energy_before - 34.0).abs() < 1e-9),
        other => panic!("expected replenish, got {other:?}"),
    }

    let sim = handle.shutdown().await.unwrap();
    assert_eq!(sim.state().rage_activations, 2);
}

#[tokio::test(start_paused = true)]
async fn test_commands_rejected_after_shutdown() {
    let handle = driver::spawn(EnergySimulator::new(), TICK);
    let commander = handle.commander();

    let sim = handle.shutdown().await.unwrap();
    assert_eq!(sim.ticks(), 0);

    assert!(commander.is_closed());
    assert_eq!(
        commander.send(Command::ToggleMoonlight).await,
        Err(ReactorError::DriverClosed)
    );
    assert_eq!(
        commander.try_send(Command::ConsumeBloodPack),
        Err(ReactorError::DriverClosed)
    );
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_driver() {
    let handle = driver::spawn(EnergySimulator::new(), TICK);
    let commander = handle.commander();
    drop(handle);

    while !commander.is_closed() {
        tokio::task::yield_now().await;
    }
    assert_eq!(
        commander.send(Command::ToggleMoonlight).await,
        Err(ReactorError::DriverClosed)
    );
}

#[tokio::test(start_paused = true)]
async fn test_commands_queued_before_shutdown_apply() {
    let handle = driver::spawn(EnergySimulator::new(), TICK);
    for _ in 0..3 {
        handle.try_send(Command::ConsumeBloodPack).unwrap();
    }
    let sim = handle.shutdown().await.unwrap();
    assert_eq!(sim.state().blood_consumed, 6);
}
