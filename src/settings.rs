//! Game settings and preferences
//!
//! Persisted separately from the best score.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;
use crate::sim::GameMode;

/// Which variant to boot into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModePreset {
    /// "Pop the circle" toy mode
    Circles,
    /// "Pop the alien, avoid game over"
    #[default]
    Aliens,
}

impl ModePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModePreset::Circles => "Circles",
            ModePreset::Aliens => "Aliens",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circles" | "circle" => Some(ModePreset::Circles),
            "aliens" | "alien" => Some(ModePreset::Aliens),
            _ => None,
        }
    }

    /// Variant configuration for the sim core
    pub fn mode(&self) -> GameMode {
        match self {
            ModePreset::Circles => GameMode::circles(),
            ModePreset::Aliens => GameMode::aliens(),
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: ModePreset,
}

impl Settings {
    const STORAGE_KEY: &'static str = "alien_pop_settings";

    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("loaded settings");
                return settings;
            }
            log::warn!("unreadable settings entry, using defaults");
        }
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(Self::STORAGE_KEY, &json);
        }
    }
}
