//! Deterministic gameplay simulation
//!
//! All round logic lives here. This module must be pure and deterministic:
//! - Events in, effects out; no engine callbacks
//! - Seeded RNG only
//! - Deferred work goes through the one-shot timer queue
//! - No rendering, input, or physics dependencies

pub mod movement;
pub mod round;
pub mod spawner;
pub mod state;
pub mod timer;

pub use movement::{MoveInput, drive_force};
pub use round::{CAMPAIGN_WON_MESSAGE, GameRound, LOSE_MESSAGE};
pub use spawner::Spawner;
pub use state::{Effect, Pickup, PickupId, PickupRegistry, RoundEvent, RoundState};
pub use timer::{TimerKind, TimerQueue, TimerToken};
