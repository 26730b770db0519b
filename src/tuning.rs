//! Data-driven game balance
//!
//! Mirrors [`crate::consts`] in a deserializable struct so balance can be
//! tweaked without touching the sim.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Target disc radius range (pixels)
    pub min_radius: f32,
    pub max_radius: f32,
    /// Upward drift: `base + per_level * level` pixels per tick
    pub base_rise_speed: f32,
    pub rise_speed_per_level: f32,
    /// Targets in the first batch
    pub initial_batch_size: u32,
    /// Frames in the explosion animation
    pub explosion_frames: u32,
    /// Placement attempts per target before the spawner gives up
    pub spawn_retry_cap: u32,
    /// Sideways drift magnitude cap; zero keeps targets rising straight up
    pub max_horizontal_drift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_radius: MIN_TARGET_RADIUS,
            max_radius: MAX_TARGET_RADIUS,
            base_rise_speed: BASE_RISE_SPEED,
            rise_speed_per_level: RISE_SPEED_PER_LEVEL,
            initial_batch_size: INITIAL_BATCH_SIZE,
            explosion_frames: EXPLOSION_FRAMES,
            spawn_retry_cap: SPAWN_RETRY_CAP,
            max_horizontal_drift: 0.0,
        }
    }
}

impl Tuning {
    /// Upward drift magnitude for a level, in pixels per tick
    pub fn rise_speed(&self, level: u32) -> f32 {
        self.base_rise_speed + self.rise_speed_per_level * level as f32
    }

    /// Sampling range for new target radii. Hand-edited tuning may carry
    /// reversed or equal bounds; the range is reordered and never empty.
    pub fn radius_range(&self) -> Range<f32> {
        let lo = self.min_radius.min(self.max_radius);
        let hi = self.max_radius.max(self.min_radius);
        if lo < hi { lo..hi } else { lo..lo + 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rise_speed_grows_with_level() {
        let tuning = Tuning::default();
        assert!((tuning.rise_speed(1) - 1.2).abs() < 1e-6);
        assert!(tuning.rise_speed(5) > tuning.rise_speed(4));
    }

    #[test]
    fn test_radius_range_is_never_empty() {
        let reversed = Tuning {
            min_radius: 90.0,
            max_radius: 40.0,
            ..Default::default()
        };
        assert_eq!(reversed.radius_range(), 40.0..90.0);

        let flat = Tuning {
            min_radius: 50.0,
            max_radius: 50.0,
            ..Default::default()
        };
        assert!(!flat.radius_range().is_empty());
    }

    #[test]
    fn test_partial_tuning_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"min_radius": 10.0}"#).unwrap();
        assert_eq!(tuning.min_radius, 10.0);
        assert_eq!(tuning.max_radius, MAX_TARGET_RADIUS);
        assert_eq!(tuning.explosion_frames, EXPLOSION_FRAMES);
    }
}
