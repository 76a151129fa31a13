//! Session transitions
//!
//! Every function takes the current snapshot and returns the next one plus the
//! events it produced, or `None` when the request does not apply (wrong screen,
//! nothing to do). Callers never see a half-updated state.

use rand::Rng;

use super::difficulty::Difficulty;
use super::drop::create_drop;
use super::state::{GameEvent, InputBuffer, Screen, SessionState};
use super::step::{advance, boundary_threshold, partition_by_boundary};
use crate::consts::*;

/// A committed state change
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub events: Vec<GameEvent>,
}

impl Transition {
    fn quiet(state: SessionState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    fn with_event(state: SessionState, event: GameEvent) -> Self {
        Self {
            state,
            events: vec![event],
        }
    }
}

/// Fresh playing state carrying over the persisted values
fn fresh_session(
    prev: &SessionState,
    difficulty: Difficulty,
    fixed_multiplicand: Option<u32>,
    stored_best: u64,
) -> Transition {
    let state = SessionState {
        screen: Screen::Playing,
        difficulty,
        fixed_multiplicand: fixed_multiplicand.filter(|t| FIXED_TABLES.contains(t)),
        next_drop_id: prev.next_drop_id,
        ..SessionState::new(stored_best, prev.sound_enabled)
    };
    log::info!(
        "Session start: {} (table {:?}), best {}",
        difficulty.as_str(),
        state.fixed_multiplicand,
        stored_best
    );
    Transition::with_event(state, GameEvent::MenuAck)
}

/// Menu -> playing
pub fn start(
    prev: &SessionState,
    difficulty: Difficulty,
    fixed_multiplicand: Option<u32>,
    stored_best: u64,
) -> Option<Transition> {
    if prev.screen != Screen::Menu {
        return None;
    }
    Some(fresh_session(prev, difficulty, fixed_multiplicand, stored_best))
}

/// Ended -> playing, same difficulty and table
pub fn play_again(prev: &SessionState, stored_best: u64) -> Option<Transition> {
    if prev.screen != Screen::Ended {
        return None;
    }
    Some(fresh_session(
        prev,
        prev.difficulty,
        prev.fixed_multiplicand,
        stored_best,
    ))
}

/// Ended -> menu, or playing -> menu (abandon)
pub fn return_to_menu(prev: &SessionState, stored_best: u64) -> Option<Transition> {
    if prev.screen == Screen::Menu {
        return None;
    }
    if prev.screen == Screen::Playing {
        log::info!("Session abandoned at score {}", prev.score);
    }
    let state = SessionState {
        next_drop_id: prev.next_drop_id,
        ..SessionState::new(stored_best, prev.sound_enabled)
    };
    Some(Transition::with_event(state, GameEvent::MenuAck))
}

/// Flip the sound preference; valid on any screen
pub fn toggle_sound(prev: &SessionState) -> Option<Transition> {
    let state = SessionState {
        sound_enabled: !prev.sound_enabled,
        ..prev.clone()
    };
    Some(Transition::with_event(state, GameEvent::MenuAck))
}

/// Edit the answer buffer while playing
fn edit_input(prev: &SessionState, edit: impl FnOnce(&mut InputBuffer) -> bool) -> Option<Transition> {
    if !prev.is_playing() {
        return None;
    }
    let mut input = prev.input.clone();
    if !edit(&mut input) {
        return None;
    }
    Some(Transition::quiet(SessionState {
        input,
        ..prev.clone()
    }))
}

/// Type a digit; no-op once the buffer holds two digits
pub fn append_digit(prev: &SessionState, digit: u8) -> Option<Transition> {
    edit_input(prev, |input| input.push_digit(digit))
}

/// Delete the last digit; no-op on an empty buffer
pub fn backspace(prev: &SessionState) -> Option<Transition> {
    edit_input(prev, InputBuffer::pop_digit)
}

/// Empty the buffer
pub fn clear_input(prev: &SessionState) -> Option<Transition> {
    edit_input(prev, |input| {
        let had_digits = !input.is_empty();
        input.clear();
        had_digits
    })
}

/// Check the typed answer against the live drops.
///
/// An empty buffer is ignored entirely. Otherwise the buffer is always cleared;
/// on a match the lowest matching drop is removed and scored.
pub fn submit(prev: &SessionState) -> Option<Transition> {
    if !prev.is_playing() || prev.input.is_empty() {
        return None;
    }

    let target = prev
        .input
        .value()
        .and_then(|answer| prev.target_for(answer))
        .map(|d| (d.id, d.answer));

    let Some((drop_id, answer)) = target else {
        log::debug!("Miss: {:?}", prev.input.as_str());
        let state = SessionState {
            input: InputBuffer::new(),
            ..prev.clone()
        };
        return Some(Transition::with_event(state, GameEvent::Miss));
    };

    log::debug!("Hit: drop {} = {}", drop_id, answer);
    let state = SessionState {
        score: prev.score + POINTS_PER_CORRECT,
        drops: prev.drops.iter().filter(|d| d.id != drop_id).cloned().collect(),
        input: InputBuffer::new(),
        correct_answers: prev.correct_answers + 1,
        total_questions: prev.total_questions + 1,
        ..prev.clone()
    };
    Some(Transition::with_event(state, GameEvent::Hit { drop_id, answer }))
}

/// Per-frame motion: move drops, charge a life for every drop past the panel line,
/// end the session when lives run out.
pub fn motion_tick(prev: &SessionState) -> Option<Transition> {
    if !prev.is_playing() || prev.drops.is_empty() {
        return None;
    }

    let split = partition_by_boundary(advance(&prev.drops), boundary_threshold());
    let lost = split.out_of_bounds.len() as u32;
    let lives = u32::from(prev.lives).saturating_sub(lost) as u8;
    let total_questions = prev.total_questions + lost;

    let mut events = Vec::new();
    if lost > 0 {
        events.push(GameEvent::LifeLost { count: lost });
    }

    if lives == 0 {
        let new_best = prev.score > prev.best_score;
        log::info!(
            "Game over: score {}, {}/{} correct{}",
            prev.score,
            prev.correct_answers,
            total_questions,
            if new_best { " (new best)" } else { "" }
        );
        events.push(GameEvent::GameOver {
            score: prev.score,
            new_best,
        });
        let state = SessionState {
            screen: Screen::Ended,
            lives: 0,
            drops: Vec::new(),
            total_questions,
            best_score: prev.best_score.max(prev.score),
            ..prev.clone()
        };
        return Some(Transition { state, events });
    }

    let state = SessionState {
        lives,
        drops: split.in_bounds,
        total_questions,
        ..prev.clone()
    };
    Some(Transition { state, events })
}

/// Add one drop unless the live set is at the profile's cap
pub fn spawn_tick<R: Rng + ?Sized>(prev: &SessionState, rng: &mut R) -> Option<Transition> {
    if !prev.is_playing() {
        return None;
    }
    let profile = prev.profile();
    if prev.drops.len() >= profile.max_drops {
        return None;
    }

    let drop = create_drop(profile, prev.fixed_multiplicand, prev.next_drop_id, rng);
    log::debug!("Spawn drop {}: {} = {}", drop.id, drop.label(), drop.answer);

    let mut drops = prev.drops.clone();
    drops.push(drop);
    Some(Transition::quiet(SessionState {
        drops,
        next_drop_id: prev.next_drop_id + 1,
        ..prev.clone()
    }))
}

/// One second on the session clock
pub fn clock_tick(prev: &SessionState) -> Option<Transition> {
    if !prev.is_playing() {
        return None;
    }
    Some(Transition::quiet(SessionState {
        elapsed_secs: prev.elapsed_secs + 1,
        ..prev.clone()
    }))
}
