//! Table Rain entry point
//!
//! Native builds run a headless demo: the autoplayer plays one session at a
//! fixed 60 Hz frame rate and the result is printed. The browser build's entry
//! point lives in `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use table_rain::autoplay::Autoplayer;
    use table_rain::persistence::FileStorage;
    use table_rain::{Difficulty, GameEvent, LogAudio, Screen, Session};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_SAVE: &str = "table-rain-save.json";

    /// Demo options from positional args: `[difficulty|table:N] [seconds] [seed]`
    struct Options {
        difficulty: Difficulty,
        table: Option<u32>,
        seconds: u32,
        seed: u64,
    }

    impl Options {
        fn from_args() -> Self {
            let args: Vec<String> = std::env::args().skip(1).collect();
            let mode = args.first().map(String::as_str);
            let (difficulty, table) = match (mode, mode.and_then(|m| m.strip_prefix("table:"))) {
                (_, Some(raw)) => {
                    let table = raw
                        .parse::<u32>()
                        .ok()
                        .filter(|t| table_rain::consts::FIXED_TABLES.contains(t));
                    if table.is_none() {
                        log::warn!("Table must be 2-9, practising mixed tables instead");
                    }
                    (Difficulty::Custom, table)
                }
                (Some(name), None) => (
                    Difficulty::from_str(name).unwrap_or_else(|| {
                        log::warn!("Unknown difficulty {:?}, using normal", name);
                        Difficulty::Normal
                    }),
                    None,
                ),
                (None, _) => (Difficulty::Normal, None),
            };
            let seconds = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(120);
            let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or_else(rand::random);
            Self {
                difficulty,
                table,
                seconds,
                seed,
            }
        }
    }

    pub fn run() {
        env_logger::init();
        let options = Options::from_args();
        let save = std::env::var("TABLE_RAIN_SAVE").unwrap_or_else(|_| DEFAULT_SAVE.to_string());
        log::info!(
            "Table Rain (native) demo: {} table {:?}, {} s, seed {}, save {}",
            options.difficulty.as_str(),
            options.table,
            options.seconds,
            options.seed,
            save
        );

        let mut session = Session::new(FileStorage::new(save), LogAudio, options.seed);
        let mut player = Autoplayer::new(options.seed ^ 0x5eed, 20, 0.15);
        session.start(options.difficulty, options.table);

        let max_frames = options.seconds * 60;
        let mut frames = 0;
        while frames < max_frames && session.snapshot().screen == Screen::Playing {
            if let Some(command) = player.next_command(session.snapshot()) {
                session.dispatch(command);
            }
            for event in session.frame(FRAME_DT) {
                if let GameEvent::LifeLost { count } = event {
                    log::info!("Missed {} drop(s), {} lives left", count, session.snapshot().lives);
                }
            }
            frames += 1;
        }

        let state = session.snapshot();
        println!("\nTable Rain - {}", options.difficulty.as_str());
        println!("  time      {}", state.clock_label());
        println!("  score     {}", state.score);
        println!("  best      {}", state.best_score);
        println!(
            "  answered  {} / {} ({}%)",
            state.correct_answers,
            state.total_questions,
            state.accuracy_percent()
        );
        println!("  lives     {}", state.lives);
        if state.is_new_best() {
            println!("  new record!");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start
}
