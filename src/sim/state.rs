//! Session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::population::Population;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance, input is live
    Running,
    /// Terminal; the session must be rebuilt to play again
    GameOver,
}

/// How targets are painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStyle {
    /// Alien bitmap scaled to the disc
    Sprites,
    /// Flat color-cycled discs
    Discs,
}

/// Variant configuration: one core, two games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMode {
    /// A target escaping the top edge ends the run
    pub game_over_on_escape: bool,
    /// Clearing a batch advances the level and grows the next one
    pub level_progression: bool,
    /// Popped targets leave an explosion animation behind
    pub explosions: bool,
    /// Draw the raw pointer coordinates next to the cursor
    pub pointer_readout: bool,
    pub style: TargetStyle,
}

impl GameMode {
    /// "Pop the alien, avoid game over" variant
    pub fn aliens() -> Self {
        Self {
            game_over_on_escape: true,
            level_progression: true,
            explosions: true,
            pointer_readout: false,
            style: TargetStyle::Sprites,
        }
    }

    /// "Pop the circle" toy variant: no terminal state, no levels
    pub fn circles() -> Self {
        Self {
            game_over_on_escape: false,
            level_progression: false,
            explosions: false,
            pointer_readout: true,
            style: TargetStyle::Discs,
        }
    }
}

/// A rising target disc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Stable identity; creation-ordered, never reused within a session
    pub id: u32,
    /// Disc center
    pub pos: Vec2,
    /// Fixed at spawn; clicks are tested against this disc
    pub radius: f32,
    /// Pixels per tick. `vel.y` stays negative; `vel.x` may flip on bounce.
    pub vel: Vec2,
    /// Short label drawn at the disc center
    pub label: String,
    /// Palette slot for the disc-style variant
    pub color_index: u32,
}

/// Explosion left behind by a popped target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    /// Copied from the popped target
    pub radius: f32,
    /// Current frame of the sprite strip, +1 per tick
    pub frame: u32,
    pub max_frame: u32,
}

impl Explosion {
    /// True once the animation has played out
    pub fn finished(&self) -> bool {
        self.frame >= self.max_frame
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    TargetPopped { id: u32 },
    TargetEscaped { id: u32 },
    LevelCleared { level: u32 },
    SpawnStarved { requested: u32, spawned: u32 },
    GameOver { score: u64 },
}

/// Complete state of one playthrough
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: GameMode,
    pub tuning: Tuning,
    /// Drawing-surface size in pixels
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    /// Starts at 1; alien variant increments per cleared batch
    pub level: u32,
    /// Targets in the next batch
    pub batch_size: u32,
    /// Persisted best score, loaded at session start (HUD only)
    pub best: u64,
    /// Simulation tick counter
    pub ticks: u64,
    pub population: Population,
    /// Last pointer-move position (circle-variant readout)
    pub last_pointer: Option<Vec2>,
}

impl SessionState {
    /// Create a session and spawn its first batch
    pub fn new(mode: GameMode, tuning: Tuning, bounds: Vec2, seed: u64, best: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut population = Population::new();
        let batch_size = tuning.initial_batch_size;

        let outcome = population.spawn_batch(batch_size, 1, bounds, &tuning, &mut rng);
        if outcome.starved() {
            log::warn!(
                "initial spawn starved: {} of {} targets placed",
                outcome.spawned,
                outcome.requested
            );
        }

        Self {
            seed,
            rng,
            mode,
            tuning,
            bounds,
            phase: GamePhase::Running,
            score: 0,
            level: 1,
            batch_size,
            best,
            ticks: 0,
            population,
            last_pointer: None,
        }
    }
}
