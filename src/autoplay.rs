//! Demo player
//!
//! Plays the game through the same `Command`s a human would send: picks the
//! lowest drop, types its answer one digit per action, then submits. Acts every
//! `think_frames` frames and can be told to fumble a share of its answers.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::session::Command;
use crate::sim::SessionState;

/// Scripted player
#[derive(Debug, Clone)]
pub struct Autoplayer {
    /// Frames to wait between actions
    think_frames: u32,
    /// Chance (0-1) of typing a wrong answer
    error_rate: f64,
    rng: Pcg32,
    cooldown: u32,
    pending: VecDeque<u8>,
    armed: bool,
}

impl Autoplayer {
    pub fn new(seed: u64, think_frames: u32, error_rate: f64) -> Self {
        Self {
            think_frames,
            error_rate: error_rate.clamp(0.0, 1.0),
            rng: Pcg32::seed_from_u64(seed),
            cooldown: 0,
            pending: VecDeque::new(),
            armed: false,
        }
    }

    /// Never-wrong player
    pub fn perfect(seed: u64, think_frames: u32) -> Self {
        Self::new(seed, think_frames, 0.0)
    }

    /// Next command for this frame, if any
    pub fn next_command(&mut self, state: &SessionState) -> Option<Command> {
        if !state.is_playing() {
            self.pending.clear();
            self.armed = false;
            self.cooldown = 0;
            return None;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        self.cooldown = self.think_frames;

        if self.armed {
            self.armed = false;
            return Some(Command::Submit);
        }
        if self.pending.is_empty() {
            if !state.input.is_empty() {
                return Some(Command::ClearInput);
            }
            let answer = self.choose_answer(state)?;
            self.pending = digits(answer);
        }

        let digit = self.pending.pop_front()?;
        self.armed = self.pending.is_empty();
        Some(Command::Digit(digit))
    }

    /// Answer to type for the most urgent drop
    fn choose_answer(&mut self, state: &SessionState) -> Option<u32> {
        let target = state
            .drops
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

        if self.error_rate > 0.0 && self.rng.random_bool(self.error_rate) {
            // Any two-digit value no live drop is waiting for
            let wrong = (1..100)
                .map(|offset| (target.answer + offset) % 100)
                .find(|v| state.drops.iter().all(|d| d.answer != *v))?;
            log::debug!("Autoplay fumbles {} as {}", target.answer, wrong);
            return Some(wrong);
        }
        Some(target.answer)
    }
}

/// Decimal digits of a value, most significant first
fn digits(value: u32) -> VecDeque<u8> {
    value
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect()
}
