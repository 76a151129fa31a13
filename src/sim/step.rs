//! Motion step and boundary check

use super::drop::Raindrop;
use crate::consts::*;

/// Result of splitting drops at the boundary line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Still above the line
    pub in_bounds: Vec<Raindrop>,
    /// At or past the line
    pub out_of_bounds: Vec<Raindrop>,
}

/// Y coordinate where the answer panel begins. A drop whose centre reaches it is missed.
pub fn boundary_threshold() -> f32 {
    FIELD_HEIGHT - INPUT_PANEL_HEIGHT
}

/// Move every drop down by its own fall speed, preserving order
pub fn advance(drops: &[Raindrop]) -> Vec<Raindrop> {
    drops.iter().map(Raindrop::advanced).collect()
}

/// Split drops into those with `y < threshold` and the rest, preserving order
pub fn partition_by_boundary(drops: Vec<Raindrop>, threshold: f32) -> Partition {
    let (in_bounds, out_of_bounds) = drops.into_iter().partition(|d| d.pos.y < threshold);
    Partition {
        in_bounds,
        out_of_bounds,
    }
}
