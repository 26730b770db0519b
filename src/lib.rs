//! Alien Pop - a single-screen click-the-target arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, hit-testing)
//! - `render`: Frame drawing against the platform surface
//! - `platform`: Browser/native platform abstraction
//! - `record`: Best-score persistence
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod record;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use record::BestScore;
pub use settings::{ModePreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Smallest target disc radius (pixels)
    pub const MIN_TARGET_RADIUS: f32 = 40.0;
    /// Largest target disc radius (pixels)
    pub const MAX_TARGET_RADIUS: f32 = 100.0;

    /// Base upward drift (pixels per tick)
    pub const BASE_RISE_SPEED: f32 = 1.0;
    /// Extra upward drift per level (pixels per tick)
    pub const RISE_SPEED_PER_LEVEL: f32 = 0.2;

    /// Targets in the first batch
    pub const INITIAL_BATCH_SIZE: u32 = 5;

    /// Frames in the explosion sprite strip
    pub const EXPLOSION_FRAMES: u32 = 28;

    /// Placement attempts per target before the spawner gives up
    pub const SPAWN_RETRY_CAP: u32 = 64;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// True when `point` falls inside the disc centered at `center`
#[inline]
pub fn disc_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    distance(center, point) <= radius
}
