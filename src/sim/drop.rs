//! Raindrop entity and the factory that spawns them

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use crate::consts::*;

/// Stable identity of a drop for its whole lifetime
pub type DropId = u64;

/// One falling multiplication problem.
///
/// Never mutated in place: motion produces a new value with only `pos.y` changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raindrop {
    pub id: DropId,
    pub factor_a: u32,
    pub factor_b: u32,
    /// `factor_a * factor_b`, fixed at spawn
    pub answer: u32,
    /// Centre of the drop. `x` is fixed at spawn, `y` grows every motion tick.
    pub pos: Vec2,
    /// Pixels per motion tick
    pub fall_speed: f32,
}

impl Raindrop {
    /// Problem text as drawn on the drop
    pub fn label(&self) -> String {
        format!("{} × {}", self.factor_a, self.factor_b)
    }

    /// Copy of this drop moved down by its own speed
    pub fn advanced(&self) -> Self {
        Self {
            pos: Vec2::new(self.pos.x, self.pos.y + self.fall_speed),
            ..self.clone()
        }
    }
}

/// Create a new drop just above the visible field.
///
/// `fixed_multiplicand` pins `factor_a` (fixed-table mode); otherwise it is drawn
/// from the profile. `factor_b` is always 1..=9.
pub fn create_drop<R: Rng + ?Sized>(
    profile: &DifficultyProfile,
    fixed_multiplicand: Option<u32>,
    id: DropId,
    rng: &mut R,
) -> Raindrop {
    let factor_a = match fixed_multiplicand {
        Some(table) => table,
        // Profiles are never empty
        None => profile.multiplicands.choose(rng).copied().unwrap_or(1),
    };
    let factor_b = rng.random_range(1..=9);
    let x = rng.random_range(DROP_SIZE..=FIELD_WIDTH - DROP_SIZE);

    Raindrop {
        id,
        factor_a,
        factor_b,
        answer: factor_a * factor_b,
        pos: Vec2::new(x, -DROP_SIZE),
        fall_speed: profile.fall_speed,
    }
}
