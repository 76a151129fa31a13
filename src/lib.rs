//! Table Rain - a falling-drop multiplication drill
//!
//! Core modules:
//! - `sim`: Simulation core (drop factory, motion step, session transitions)
//! - `session`: Stateful controller that owns the timers and routes effects
//! - `timers`: Motion/spawn/clock tick sources
//! - `persistence`: Key-value storage backends
//! - `prefs`: Best score and sound preference, read/written through `persistence`
//! - `audio`: Sound effect sinks
//! - `autoplay`: Scripted player for demos and soak tests
//! - `platform`: Browser bindings

pub mod audio;
pub mod autoplay;
pub mod persistence;
pub mod platform;
pub mod prefs;
pub mod session;
pub mod sim;
pub mod timers;

pub use audio::{AudioSink, LogAudio, SoundEffect};
pub use persistence::{MemoryStorage, Storage, StorageError};
pub use prefs::Preferences;
pub use session::{Command, Session};
pub use sim::{Difficulty, DifficultyProfile, GameEvent, Raindrop, Screen, SessionState};

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 800.0;
    /// Height of the answer panel at the bottom of the field
    pub const INPUT_PANEL_HEIGHT: f32 = 220.0;

    /// Drop diameter; also the spawn offset above the field and the side margin
    pub const DROP_SIZE: f32 = 80.0;

    /// Lives at session start
    pub const INITIAL_LIVES: u8 = 3;
    /// Points per correct answer
    pub const POINTS_PER_CORRECT: u64 = 10;
    /// Maximum digits in the answer buffer
    pub const MAX_INPUT_DIGITS: usize = 2;

    /// Second-counter period (seconds)
    pub const CLOCK_PERIOD: f32 = 1.0;
    /// Max interval ticks fired per frame; the rest of the backlog is dropped
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Multiplicands selectable in fixed-table mode
    pub const FIXED_TABLES: [u32; 8] = [2, 3, 4, 5, 6, 7, 8, 9];
}
