//! Best-score persistence
//!
//! A single value in the host key-value store, read at session start and
//! written at game over. Monotonically non-decreasing across the lifetime
//! of the storage.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub best: u64,
}

impl BestScore {
    /// Storage key, shared by both variants
    const STORAGE_KEY: &'static str = "alien_pop_record";

    /// Load the record; a missing or corrupt entry falls back to zero
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(record @ BestScore { best }) => {
                    log::info!("loaded best score {}", best);
                    record
                }
                Err(err) => {
                    log::warn!("corrupt best-score entry ({err}), starting fresh");
                    Self::default()
                }
            },
            None => {
                log::info!("no best score recorded yet");
                Self::default()
            }
        }
    }

    /// Record a finished run. Persists and returns true only when `score`
    /// beats the stored best; ties and lower scores leave the store alone.
    pub fn submit(&mut self, score: u64, store: &mut impl KeyValueStore) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.save(store);
        true
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("best score {} saved", self.best);
            }
            Err(err) => log::error!("failed to serialize best score: {err}"),
        }
    }
}
