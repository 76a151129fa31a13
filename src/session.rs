//! Session controller
//!
//! Owns the authoritative `SessionState` and is the only thing that replaces it.
//! User intents and timer ticks all arrive as `Command`s and are applied one at a
//! time through `dispatch`, so every transition sees a complete snapshot.
//!
//! Side effects (timers, sound, saving the best score) are derived from the
//! transition's events after the new snapshot is in place.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::persistence::Storage;
use crate::prefs::Preferences;
use crate::sim::{self, Difficulty, DropId, GameEvent, Screen, SessionState, Transition};
use crate::timers::SessionTimers;

/// A request to change the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the menu and start playing
    Start {
        difficulty: Difficulty,
        fixed_multiplicand: Option<u32>,
    },
    /// Restart from the end screen with the same settings
    PlayAgain,
    /// Back to the menu from the end screen, or abandon a running game
    ReturnToMenu,
    ToggleSound,
    /// Type a digit 0-9
    Digit(u8),
    Backspace,
    ClearInput,
    Submit,
    /// Per-frame motion tick
    Motion,
    /// Spawn-interval tick
    Spawn,
    /// One-second clock tick
    Clock,
}

/// What happened to a submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to submit, or not playing
    Ignored,
    Hit { drop_id: DropId, answer: u32 },
    Miss,
}

/// The stateful orchestrator of one player's sessions
pub struct Session<S: Storage, A: AudioSink> {
    state: SessionState,
    timers: SessionTimers,
    rng: Pcg32,
    storage: S,
    audio: A,
    revision: u64,
}

impl<S: Storage, A: AudioSink> Session<S, A> {
    /// Create a controller on the menu screen, reading preferences from `storage`
    pub fn new(storage: S, audio: A, seed: u64) -> Self {
        let prefs = Preferences::load(&storage);
        log::info!(
            "Session controller ready (best {}, sound {})",
            prefs.best_score,
            if prefs.sound_enabled { "on" } else { "off" }
        );
        Self {
            state: SessionState::new(prefs.best_score, prefs.sound_enabled),
            timers: SessionTimers::default(),
            rng: Pcg32::seed_from_u64(seed),
            storage,
            audio,
            revision: 0,
        }
    }

    /// Read-only view of the current snapshot
    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }

    /// Bumped on every applied transition
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True while any tick source is live
    pub fn timers_running(&self) -> bool {
        self.timers.is_running()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Apply one command. Requests that do not apply to the current screen are no-ops.
    pub fn dispatch(&mut self, command: Command) -> Vec<GameEvent> {
        let prev = &self.state;
        let transition = match command {
            Command::Start {
                difficulty,
                fixed_multiplicand,
            } => sim::start(prev, difficulty, fixed_multiplicand, self.stored_best()),
            Command::PlayAgain => sim::play_again(prev, self.stored_best()),
            Command::ReturnToMenu => sim::return_to_menu(prev, self.stored_best()),
            Command::ToggleSound => sim::toggle_sound(prev),
            Command::Digit(digit) => sim::append_digit(prev, digit),
            Command::Backspace => sim::backspace(prev),
            Command::ClearInput => sim::clear_input(prev),
            Command::Submit => sim::submit(prev),
            Command::Motion => sim::motion_tick(prev),
            Command::Spawn => sim::spawn_tick(prev, &mut self.rng),
            Command::Clock => sim::clock_tick(prev),
        };

        match transition {
            Some(transition) => self.commit(transition),
            None => Vec::new(),
        }
    }

    /// Advance one rendered frame of `dt` seconds: motion first, then any due
    /// spawn ticks, then any due clock ticks.
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let due = self.timers.frame(dt);
        let mut events = Vec::new();
        if due.motion {
            events.extend(self.dispatch(Command::Motion));
        }
        for _ in 0..due.spawn {
            events.extend(self.dispatch(Command::Spawn));
        }
        for _ in 0..due.clock {
            events.extend(self.dispatch(Command::Clock));
        }
        events
    }

    pub fn start(&mut self, difficulty: Difficulty, fixed_multiplicand: Option<u32>) {
        self.dispatch(Command::Start {
            difficulty,
            fixed_multiplicand,
        });
    }

    pub fn play_again(&mut self) {
        self.dispatch(Command::PlayAgain);
    }

    pub fn return_to_menu(&mut self) {
        self.dispatch(Command::ReturnToMenu);
    }

    pub fn toggle_sound(&mut self) {
        self.dispatch(Command::ToggleSound);
    }

    pub fn press_digit(&mut self, digit: u8) {
        self.dispatch(Command::Digit(digit));
    }

    pub fn backspace(&mut self) {
        self.dispatch(Command::Backspace);
    }

    pub fn clear_input(&mut self) {
        self.dispatch(Command::ClearInput);
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        self.dispatch(Command::Submit)
            .iter()
            .find_map(|event| match *event {
                GameEvent::Hit { drop_id, answer } => Some(SubmitOutcome::Hit { drop_id, answer }),
                GameEvent::Miss => Some(SubmitOutcome::Miss),
                _ => None,
            })
            .unwrap_or(SubmitOutcome::Ignored)
    }

    /// Best score to seed a new screen with; never lower than what this process has seen
    fn stored_best(&self) -> u64 {
        Preferences::load_best_score(&self.storage).max(self.state.best_score)
    }

    /// Swap in the new snapshot, then run its side effects
    fn commit(&mut self, transition: Transition) -> Vec<GameEvent> {
        let Transition { state, events } = transition;
        let prev_screen = self.state.screen;
        let prev_sound = self.state.sound_enabled;

        self.state = state;
        self.revision += 1;

        if prev_screen != self.state.screen {
            log::info!("Screen: {:?} -> {:?}", prev_screen, self.state.screen);
            if self.state.screen == Screen::Playing {
                self.timers.start(self.state.profile().spawn_interval);
            } else {
                self.timers.stop();
            }
        }

        if prev_sound != self.state.sound_enabled {
            Preferences::save_sound_enabled(&mut self.storage, self.state.sound_enabled);
        }

        for event in &events {
            if let GameEvent::GameOver {
                score,
                new_best: true,
            } = *event
            {
                Preferences::save_best_score(&mut self.storage, score);
            }
            // Gate on the preference in force when the event was raised
            if prev_sound {
                self.audio.play(SoundEffect::for_event(event));
            }
        }

        events
    }
}
