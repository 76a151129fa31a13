//! Persisted player preferences
//!
//! Two scalars kept in a `Storage` under their own keys. Storage problems never
//! reach the player: reads fall back to defaults, writes are best-effort.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Values that survive between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Highest score ever reached
    pub best_score: u64,
    /// Sound effects on/off
    pub sound_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            best_score: 0,
            sound_enabled: true,
        }
    }
}

impl Preferences {
    /// Storage keys
    pub const BEST_SCORE_KEY: &'static str = "table_rain_best_score";
    pub const SOUND_ENABLED_KEY: &'static str = "table_rain_sound_enabled";

    /// Load both values, defaulting each one independently
    pub fn load(storage: &impl Storage) -> Self {
        Self {
            best_score: Self::load_best_score(storage),
            sound_enabled: Self::load_sound_enabled(storage),
        }
    }

    /// Stored best score, 0 if missing or unreadable
    pub fn load_best_score(storage: &impl Storage) -> u64 {
        match storage.get(Self::BEST_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed best score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Best score unavailable, using 0: {}", e);
                0
            }
        }
    }

    /// Stored sound flag; anything other than "false" means enabled
    pub fn load_sound_enabled(storage: &impl Storage) -> bool {
        match storage.get(Self::SOUND_ENABLED_KEY) {
            Ok(Some(raw)) => raw.trim() != "false",
            Ok(None) => true,
            Err(e) => {
                log::warn!("Sound preference unavailable, using on: {}", e);
                true
            }
        }
    }

    /// Best-effort write of the best score
    pub fn save_best_score(storage: &mut impl Storage, score: u64) {
        match storage.set(Self::BEST_SCORE_KEY, &score.to_string()) {
            Ok(()) => log::info!("Best score saved: {}", score),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }

    /// Best-effort write of the sound flag
    pub fn save_sound_enabled(storage: &mut impl Storage, enabled: bool) {
        if let Err(e) = storage.set(Self::SOUND_ENABLED_KEY, &enabled.to_string()) {
            log::warn!("Could not save sound preference: {}", e);
        }
    }
}
