//! Deterministic simulation module
//!
//! All gameplay logic lives here. No rendering or platform calls:
//! - Seeded RNG only
//! - One motion step per delivered frame, one countdown step per delivered tick
//! - Click order is ascending entity id, independent of storage order

pub mod click;
pub mod game;
pub mod motion;
pub mod pool;
pub mod state;
pub mod timer;

pub use click::{ClickVerdict, arbitrate};
pub use game::{ClickOutcome, Game, Marker, StartError};
pub use motion::{bounce_axis, integrate, step_entity};
pub use pool::{Entity, EntityPool};
pub use state::{GamePhase, GameSession, LossReason, MSG_NO_BEARS, MSG_TIMEOUT, MSG_WON};
pub use timer::{TimerTick, apply_tick, timed_out};
