//! Live entity ownership: spawn placement, removal, hit-testing
//!
//! The population owns the target and explosion sets so the membership
//! invariants are enforced in one place:
//! - no two targets are ever created overlapping
//! - removal is idempotent (boundary check and same-frame click may both
//!   ask for the same target)
//! - iteration order is creation order (ascending entity ID)

use glam::Vec2;
use rand::Rng;

use super::state::{Explosion, Target};
use crate::tuning::Tuning;
use crate::{disc_contains, distance};

/// Result of one `spawn_batch` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub requested: u32,
    pub spawned: u32,
}

impl SpawnOutcome {
    /// True when the retry cap forced the batch short
    pub fn starved(&self) -> bool {
        self.spawned < self.requested
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    targets: Vec<Target>,
    explosions: Vec<Explosion>,
    next_id: u32,
}

impl Default for Population {
    fn default() -> Self {
        Self::new()
    }
}

impl Population {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            explosions: Vec::new(),
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn up to `count` targets just below the bottom edge.
    ///
    /// Positions are rejection-sampled until the candidate disc clears every
    /// live target (center distance >= sum of radii). Attempts per target
    /// are capped; on exhaustion the remainder of the batch is dropped
    /// rather than looping forever.
    pub fn spawn_batch(
        &mut self,
        count: u32,
        level: u32,
        bounds: Vec2,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> SpawnOutcome {
        let mut spawned = 0u32;

        'batch: for slot in 0..count {
            for _attempt in 0..tuning.spawn_retry_cap {
                let radius = rng.random_range(tuning.radius_range());
                if radius * 2.0 >= bounds.x {
                    // Disc cannot fit the surface at all
                    continue;
                }
                let x = rng.random_range(radius..bounds.x - radius);
                let pos = Vec2::new(x, bounds.y + radius);

                if self
                    .targets
                    .iter()
                    .any(|t| distance(pos, t.pos) < radius + t.radius)
                {
                    continue;
                }

                let speed = tuning.rise_speed(level);
                let drift = if tuning.max_horizontal_drift > 0.0 {
                    rng.random_range(-tuning.max_horizontal_drift..tuning.max_horizontal_drift)
                } else {
                    0.0
                };

                let id = self.next_entity_id();
                self.targets.push(Target {
                    id,
                    pos,
                    radius,
                    vel: Vec2::new(drift, -speed),
                    label: (slot + 1).to_string(),
                    color_index: slot,
                });
                spawned += 1;
                continue 'batch;
            }

            log::warn!(
                "spawn starved after {} attempts; dropping {} of {} targets",
                tuning.spawn_retry_cap,
                count - spawned,
                count
            );
            break;
        }

        SpawnOutcome {
            requested: count,
            spawned,
        }
    }

    /// Remove a target by ID. Idempotent: removing an absent ID is a no-op.
    pub fn remove_target(&mut self, id: u32) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        self.targets.len() != before
    }

    /// First target (creation order) whose disc contains `point`
    pub fn hit_test(&self, point: Vec2) -> Option<&Target> {
        self.targets
            .iter()
            .find(|t| disc_contains(t.pos, t.radius, point))
    }

    pub fn push_explosion(&mut self, pos: Vec2, radius: f32, max_frame: u32) {
        let id = self.next_entity_id();
        self.explosions.push(Explosion {
            id,
            pos,
            radius,
            frame: 0,
            max_frame,
        });
    }

    /// Drop explosions whose animation has played out
    pub fn retire_finished_explosions(&mut self) {
        self.explosions.retain(|e| !e.finished());
    }

    /// True when no targets are live (explosions don't count)
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn explosion_count(&self) -> usize {
        self.explosions.len()
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.targets.iter_mut()
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn explosions_mut(&mut self) -> impl Iterator<Item = &mut Explosion> {
        self.explosions.iter_mut()
    }
}
