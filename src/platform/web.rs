//! Browser bindings
//!
//! The page owns the render loop and the DOM. It forwards button presses and
//! `requestAnimationFrame` timestamps here and redraws from `snapshot_json()`
//! whenever `revision()` moves.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::persistence::LocalStorage;
use crate::session::{Session, SubmitOutcome};
use crate::sim::Difficulty;

/// Longest frame accepted from the page; longer gaps (hidden tab) are clamped
const MAX_FRAME_SECS: f32 = 0.1;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Table Rain (web) starting...");
}

/// One player's game, owned by the page
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorage, WebAudio>,
    last_time_ms: Option<f64>,
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = js_sys::Date::now() as u64;
        Self {
            session: Session::new(LocalStorage, WebAudio::new(), seed),
            last_time_ms: None,
        }
    }

    /// Start a tier by name ("easy", "normal", "hard")
    pub fn start(&mut self, difficulty: &str) {
        match Difficulty::from_str(difficulty) {
            Some(d) => self.session.start(d, None),
            None => log::warn!("Unknown difficulty {:?}", difficulty),
        }
        self.last_time_ms = None;
    }

    /// Start fixed-table practice
    pub fn start_table(&mut self, table: u32) {
        self.session.start(Difficulty::Custom, Some(table));
        self.last_time_ms = None;
    }

    pub fn play_again(&mut self) {
        self.session.play_again();
        self.last_time_ms = None;
    }

    pub fn main_menu(&mut self) {
        self.session.return_to_menu();
    }

    pub fn toggle_sound(&mut self) {
        self.session.toggle_sound();
    }

    pub fn press_digit(&mut self, digit: u8) {
        self.session.press_digit(digit);
    }

    pub fn backspace(&mut self) {
        self.session.backspace();
    }

    pub fn clear_input(&mut self) {
        self.session.clear_input();
    }

    /// Returns "hit", "miss", or "" when nothing was submitted
    pub fn submit(&mut self) -> String {
        match self.session.submit() {
            SubmitOutcome::Hit { .. } => "hit".to_string(),
            SubmitOutcome::Miss => "miss".to_string(),
            SubmitOutcome::Ignored => String::new(),
        }
    }

    /// Called from `requestAnimationFrame` with its timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let dt = match self.last_time_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_SECS),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.session.frame(dt);
    }

    pub fn revision(&self) -> u64 {
        self.session.revision()
    }

    /// Current snapshot plus derived stats, as JSON
    pub fn snapshot_json(&self) -> String {
        let state = self.session.snapshot();
        let view = serde_json::json!({
            "state": state,
            "labels": state.drops.iter().map(|d| d.label()).collect::<Vec<_>>(),
            "clock": state.clock_label(),
            "accuracy": state.accuracy_percent(),
            "new_best": state.is_new_best(),
        });
        view.to_string()
    }
}
