//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per displayed frame
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod population;
pub mod state;
pub mod tick;

pub use population::{Population, SpawnOutcome};
pub use state::{
    Explosion, GameEvent, GameMode, GamePhase, SessionState, Target, TargetStyle,
};
pub use tick::{TickInput, tick};
