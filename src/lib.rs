//! Moving Bears - click the bears in ascending id order before time runs out
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pool, motion, timer, state machine)
//! - `bears`: Bear records, data provider contract and fallback roster
//! - `platform`: Frame/interval scheduling seam (browser and headless hosts)
//! - `settings`: User preferences persisted in LocalStorage

pub mod bears;
pub mod platform;
pub mod settings;
pub mod sim;

pub use bears::{Bear, BearColor, BearProvider, DataUnavailable};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Bounce margin: positions are clamped to [BOUNCE_MIN, BOUNCE_MAX] on both axes
    pub const BOUNCE_MIN: f32 = 5.0;
    pub const BOUNCE_MAX: f32 = 95.0;

    /// Spawn range, wider margin than the bounce so nothing starts on a wall
    pub const SPAWN_MIN: f32 = 10.0;
    pub const SPAWN_MAX: f32 = 90.0;

    /// Maximum per-axis speed at spawn (arena units per frame)
    pub const MAX_SPAWN_SPEED: f32 = 1.0;

    /// Countdown budget for one play-through
    pub const TIME_BUDGET_SECS: u32 = 30;
    /// Timer stream period
    pub const TIMER_PERIOD_MS: u32 = 1000;
}
