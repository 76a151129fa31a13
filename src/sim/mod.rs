//! Simulation core
//!
//! All gameplay rules live here. This module must stay pure:
//! - Transitions take a snapshot and return a new one
//! - Randomness only through the caller-supplied RNG
//! - Stable iteration order (spawn order)
//! - No audio, storage, or platform dependencies

pub mod difficulty;
pub mod drop;
pub mod state;
pub mod step;
pub mod tick;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use drop::{DropId, Raindrop, create_drop};
pub use state::{GameEvent, InputBuffer, Screen, SessionState};
pub use step::{Partition, advance, boundary_threshold, partition_by_boundary};
pub use tick::{
    Transition, append_digit, backspace, clear_input, clock_tick, motion_tick,
    play_again, return_to_menu, spawn_tick, start, submit, toggle_sound,
};
