//! Difficulty tiers and their tuning table

use serde::{Deserialize, Serialize};

/// Difficulty tier selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    /// Fixed-table practice: normal pacing, one pinned multiplicand
    Custom,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "custom" | "table" => Some(Difficulty::Custom),
            _ => None,
        }
    }

    /// Tuning profile for this tier
    pub fn profile(&self) -> &'static DifficultyProfile {
        DifficultyProfile::for_difficulty(*self)
    }
}

/// Immutable tuning bundle for one tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyProfile {
    /// Multiplicands a drop may be drawn from
    pub multiplicands: &'static [u32],
    /// Pixels per motion tick
    pub fall_speed: f32,
    /// Seconds between spawn ticks
    pub spawn_interval: f32,
    /// Cap on live drops
    pub max_drops: usize,
}

static EASY: DifficultyProfile = DifficultyProfile {
    multiplicands: &[2, 3, 4, 5],
    fall_speed: 1.5,
    spawn_interval: 3.0,
    max_drops: 3,
};

static NORMAL: DifficultyProfile = DifficultyProfile {
    multiplicands: &[2, 3, 4, 5, 6, 7],
    fall_speed: 2.5,
    spawn_interval: 2.5,
    max_drops: 4,
};

static HARD: DifficultyProfile = DifficultyProfile {
    multiplicands: &[2, 3, 4, 5, 6, 7, 8, 9],
    fall_speed: 3.5,
    spawn_interval: 2.0,
    max_drops: 5,
};

impl DifficultyProfile {
    /// Look up the profile for a tier. Custom reuses normal's pacing.
    pub fn for_difficulty(difficulty: Difficulty) -> &'static Self {
        match difficulty {
            Difficulty::Easy => &EASY,
            Difficulty::Normal | Difficulty::Custom => &NORMAL,
            Difficulty::Hard => &HARD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_reuses_normal_pacing() {
        let custom = Difficulty::Custom.profile();
        let normal = Difficulty::Normal.profile();
        assert_eq!(custom, normal);
    }

    #[test]
    fn test_tiers_get_harder() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(hard.fall_speed > easy.fall_speed);
        assert!(hard.spawn_interval < easy.spawn_interval);
        assert!(hard.max_drops > easy.max_drops);
        assert!(hard.multiplicands.len() > easy.multiplicands.len());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("table"), Some(Difficulty::Custom));
        assert_eq!(Difficulty::from_str("brutal"), None);
        assert_eq!(Difficulty::from_str("med"), None);
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard, Difficulty::Custom] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }
}
