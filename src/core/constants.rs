// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const MIN_TICK_INTERVAL_MS: u64 = 10;
pub const MAX_TICK_INTERVAL_MS: u64 = 10_000;
pub const FRAME_POLL_MS: u64 = 50;
pub const MIN_FRAME_POLL_MS: u64 = 10;
pub const MAX_FRAME_POLL_MS: u64 = 1_000;
pub const REPLENISH_WAVE_MS: u64 = 800;

// Energy
pub const MAX_ENERGY: f64 = 100.0;
pub const MIN_ENERGY: f64 = 0.0;
pub const RAGE_THRESHOLD: f64 = 25.0;
pub const HIGH_ENERGY_THRESHOLD: f64 = 75.0;

// Drain per tick, by activity level
pub const IDLE_DRAIN_RATE: f64 = 0.02;
pub const ACTIVE_DRAIN_RATE: f64 = 0.08;
pub const COMBAT_DRAIN_RATE: f64 = 0.20;
pub const MOONLIGHT_MULTIPLIER: f64 = 0.4;

// Blood packs and progression
pub const BLOOD_PACK_ENERGY: f64 = 34.0;
pub const BLOOD_PACK_XP: u32 = 25;
pub const XP_TO_NEXT: u32 = 500;

// Stability card flips to "Volatile" below this index
pub const VOLATILE_STABILITY_BELOW: f64 = 4.0;

// Starting values for a fresh session
pub const INITIAL_ENERGY: f64 = 78.0;
pub const INITIAL_LEVEL: u32 = 4;
pub const INITIAL_XP: u32 = 340;
pub const INITIAL_BLOOD_CONSUMED: u32 = 3;
pub const INITIAL_RAGE_ACTIVATIONS: u32 = 1;

// Session analytics
pub const SAMPLE_EVERY_TICKS: u64 = 10;
pub const HISTORY_CAPACITY: usize = 120;

// Driver channels
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
