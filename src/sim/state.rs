//! Session snapshot and its building blocks
//!
//! A `SessionState` is a value: transitions in `tick` build a new one from the
//! previous, and the controller swaps it in whole.

use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyProfile};
use super::drop::{DropId, Raindrop};
use crate::consts::*;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Screen {
    #[default]
    Menu,
    Playing,
    Ended,
}

/// Digits typed so far, capped at `MAX_INPUT_DIGITS`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputBuffer(String);

impl InputBuffer {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Append a digit 0-9. Returns false (and changes nothing) when full or not a digit.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || self.0.len() >= MAX_INPUT_DIGITS {
            return false;
        }
        self.0.push(char::from(b'0' + digit));
        true
    }

    /// Remove the last digit. Returns false on an empty buffer.
    pub fn pop_digit(&mut self) -> bool {
        self.0.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_INPUT_DIGITS
    }

    /// Numeric value, None if empty or unparsable
    pub fn value(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

/// Effects emitted by a transition, for audio and persistence collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Submitted answer matched and removed a drop
    Hit { drop_id: DropId, answer: u32 },
    /// Submitted answer matched nothing
    Miss,
    /// Drops crossed into the answer panel this tick
    LifeLost { count: u32 },
    /// Lives ran out
    GameOver { score: u64, new_best: bool },
    /// Menu action acknowledged (start, play again, menu, sound toggle)
    MenuAck,
}

/// Complete session snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub screen: Screen,
    pub difficulty: Difficulty,
    /// Pinned multiplicand in fixed-table mode
    pub fixed_multiplicand: Option<u32>,
    pub score: u64,
    pub lives: u8,
    /// Live drops in spawn order
    pub drops: Vec<Raindrop>,
    pub input: InputBuffer,
    /// Questions answered correctly or missed
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Persisted best score
    pub best_score: u64,
    /// Seconds on the clock this session
    pub elapsed_secs: u32,
    /// Persisted sound preference
    pub sound_enabled: bool,
    /// Next drop id
    #[serde(default)]
    pub(crate) next_drop_id: DropId,
}

impl SessionState {
    /// Fresh menu state with the persisted values
    pub fn new(best_score: u64, sound_enabled: bool) -> Self {
        Self {
            screen: Screen::Menu,
            difficulty: Difficulty::default(),
            fixed_multiplicand: None,
            score: 0,
            lives: INITIAL_LIVES,
            drops: Vec::new(),
            input: InputBuffer::new(),
            total_questions: 0,
            correct_answers: 0,
            best_score,
            elapsed_secs: 0,
            sound_enabled,
            next_drop_id: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }

    /// Profile driving spawn pacing and fall speed
    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    /// Percentage of questions answered correctly, rounded
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        (self.correct_answers as f64 / self.total_questions as f64 * 100.0).round() as u32
    }

    /// True on the end screen when this session set the record
    pub fn is_new_best(&self) -> bool {
        self.screen == Screen::Ended && self.score > 0 && self.score == self.best_score
    }

    /// Elapsed time as MM:SS
    pub fn clock_label(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }

    /// Drop the player would clear by submitting `answer`: the lowest match on screen
    pub fn target_for(&self, answer: u32) -> Option<&Raindrop> {
        self.drops
            .iter()
            .filter(|d| d.answer == answer)
            .fold(None, |lowest: Option<&Raindrop>, d| match lowest {
                Some(l) if d.pos.y <= l.pos.y => Some(l),
                _ => Some(d),
            })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(0, true)
    }
}
