//! Full sessions driven through the public controller API

use table_rain::autoplay::Autoplayer;
use table_rain::session::SubmitOutcome;
use table_rain::{
    AudioSink, Difficulty, GameEvent, MemoryStorage, Preferences, Screen, Session, SoundEffect,
    Storage, StorageError,
};

const FRAME_DT: f32 = 1.0 / 60.0;

/// Audio sink that remembers what it was asked to play
#[derive(Default)]
struct Recorder(Vec<SoundEffect>);

impl AudioSink for Recorder {
    fn play(&mut self, effect: SoundEffect) {
        self.0.push(effect);
    }
}

/// Storage that always fails
struct Offline;

impl Storage for Offline {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("offline".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("offline".to_string()))
    }
}

fn new_session(storage: MemoryStorage) -> Session<MemoryStorage, Recorder> {
    Session::new(storage, Recorder::default(), 2024)
}

/// Run frames (with an optional player) until the session leaves `Playing`
fn run_until_end<S: Storage, A: AudioSink>(
    session: &mut Session<S, A>,
    mut player: Option<&mut Autoplayer>,
    max_frames: u32,
) -> u32 {
    for frame in 0..max_frames {
        if session.snapshot().screen != Screen::Playing {
            return frame;
        }
        if let Some(command) = player.as_deref_mut().and_then(|p| p.next_command(session.snapshot())) {
            session.dispatch(command);
        }
        session.frame(FRAME_DT);
    }
    max_frames
}

/// Frames until the first drop appears
fn run_until_drop<S: Storage, A: AudioSink>(session: &mut Session<S, A>) {
    for _ in 0..1000 {
        if !session.snapshot().drops.is_empty() {
            return;
        }
        session.frame(FRAME_DT);
    }
    panic!("no drop spawned");
}

#[test]
fn answering_a_live_drop_scores() {
    let mut session = new_session(MemoryStorage::new());
    session.start(Difficulty::Normal, None);
    run_until_drop(&mut session);

    let drop = session.snapshot().drops[0].clone();
    assert!(Difficulty::Normal.profile().multiplicands.contains(&drop.factor_a));
    for digit in drop.answer.to_string().bytes().map(|b| b - b'0') {
        session.press_digit(digit);
    }
    assert_eq!(session.snapshot().input.as_str(), drop.answer.to_string());

    let outcome = session.submit();
    assert_eq!(
        outcome,
        SubmitOutcome::Hit {
            drop_id: drop.id,
            answer: drop.answer
        }
    );
    let state = session.snapshot();
    assert_eq!(state.score, 10);
    assert!(state.drops.iter().all(|d| d.id != drop.id));
    assert_eq!(state.correct_answers, 1);
    assert_eq!(state.total_questions, 1);
    assert!(state.input.is_empty());
    assert_eq!(session.audio().0.last(), Some(&SoundEffect::Correct));
}

#[test]
fn wrong_answer_only_clears_input() {
    let mut session = new_session(MemoryStorage::new());
    session.start(Difficulty::Easy, None);
    run_until_drop(&mut session);

    // Easy answers top out at 45
    session.press_digit(9);
    session.press_digit(9);
    session.press_digit(9);
    assert_eq!(session.snapshot().input.as_str(), "99");

    let before = session.snapshot().clone();
    assert_eq!(session.submit(), SubmitOutcome::Miss);
    let after = session.snapshot();
    assert_eq!(after.score, before.score);
    assert_eq!(after.lives, before.lives);
    assert_eq!(after.drops, before.drops);
    assert!(after.input.is_empty());
    assert_eq!(session.audio().0.last(), Some(&SoundEffect::Wrong));
}

#[test]
fn unanswered_drops_end_the_game() {
    let mut session = new_session(MemoryStorage::new());
    session.start(Difficulty::Easy, None);
    let frames = run_until_end(&mut session, None, 5000);
    assert!(frames < 5000, "game should end without answers");

    let state = session.snapshot();
    assert_eq!(state.screen, Screen::Ended);
    assert_eq!(state.lives, 0);
    assert!(state.drops.is_empty());
    assert_eq!(state.total_questions, 3);
    assert_eq!(state.accuracy_percent(), 0);
    assert!(!session.timers_running());

    let sounds = &session.audio().0;
    assert_eq!(sounds.iter().filter(|s| **s == SoundEffect::LifeLost).count(), 3);
    assert_eq!(sounds.last(), Some(&SoundEffect::GameOver));

    // Zero never beats the default best, so nothing is written
    assert_eq!(session.storage().get(Preferences::BEST_SCORE_KEY).unwrap(), None);

    // Later frames and answers do nothing
    let rev = session.revision();
    session.press_digit(1);
    assert_eq!(session.submit(), SubmitOutcome::Ignored);
    assert!(session.frame(5.0).is_empty());
    assert_eq!(session.revision(), rev);
}

#[test]
fn perfect_player_survives_easy() {
    let mut session = new_session(MemoryStorage::new());
    let mut player = Autoplayer::perfect(7, 5);
    session.start(Difficulty::Easy, None);

    let frames = run_until_end(&mut session, Some(&mut player), 60 * 60);
    assert_eq!(frames, 60 * 60);

    let state = session.snapshot();
    assert_eq!(state.screen, Screen::Playing);
    assert_eq!(state.lives, 3);
    assert!(state.score >= 100);
    assert_eq!(state.correct_answers, state.total_questions);
    assert!((59..=60).contains(&state.elapsed_secs));
}

#[test]
fn new_best_is_saved_and_reloaded() {
    let mut session = new_session(MemoryStorage::new());
    let mut player = Autoplayer::perfect(11, 5);
    session.start(Difficulty::Hard, None);

    // Score for a while, then stop answering
    for _ in 0..1200 {
        if let Some(command) = player.next_command(session.snapshot()) {
            session.dispatch(command);
        }
        session.frame(FRAME_DT);
    }
    let score = session.snapshot().score;
    assert!(score > 0);
    run_until_end(&mut session, None, 10_000);

    let state = session.snapshot();
    assert_eq!(state.screen, Screen::Ended);
    assert_eq!(state.best_score, score);
    assert!(state.is_new_best());
    assert_eq!(Preferences::load_best_score(session.storage()), score);

    let reopened = new_session(session.storage().clone());
    assert_eq!(reopened.snapshot().best_score, score);
}

#[test]
fn lower_score_keeps_previous_best() {
    let storage = MemoryStorage::new().with_entry(Preferences::BEST_SCORE_KEY, "500");
    let mut session = new_session(storage);
    assert_eq!(session.snapshot().best_score, 500);
    session.start(Difficulty::Hard, None);
    run_until_end(&mut session, None, 10_000);

    let state = session.snapshot();
    assert_eq!(state.best_score, 500);
    assert!(!state.is_new_best());
    assert_eq!(Preferences::load_best_score(session.storage()), 500);
}

#[test]
fn play_again_and_menu_routes() {
    let mut session = new_session(MemoryStorage::new());
    session.start(Difficulty::Custom, Some(4));
    run_until_end(&mut session, None, 10_000);
    assert_eq!(session.snapshot().screen, Screen::Ended);

    session.play_again();
    let state = session.snapshot();
    assert_eq!(state.screen, Screen::Playing);
    assert_eq!(state.difficulty, Difficulty::Custom);
    assert_eq!(state.fixed_multiplicand, Some(4));
    assert_eq!(state.lives, 3);
    assert_eq!(state.total_questions, 0);
    assert!(session.timers_running());

    run_until_drop(&mut session);
    assert!(session.snapshot().drops.iter().all(|d| d.factor_a == 4));

    session.return_to_menu();
    assert_eq!(session.snapshot().screen, Screen::Menu);
    assert!(!session.timers_running());
    assert!(session.snapshot().drops.is_empty());
}

#[test]
fn muted_session_plays_nothing() {
    let mut session = new_session(MemoryStorage::new());
    session.toggle_sound();
    // The toggle itself is acknowledged with the old preference
    assert_eq!(session.audio().0, vec![SoundEffect::Click]);
    assert!(!Preferences::load_sound_enabled(session.storage()));

    session.start(Difficulty::Easy, None);
    run_until_end(&mut session, None, 5000);
    assert_eq!(session.audio().0, vec![SoundEffect::Click]);

    // Preference survives a restart
    let reopened = new_session(session.storage().clone());
    assert!(!reopened.snapshot().sound_enabled);
}

#[test]
fn offline_storage_never_blocks_play() {
    let mut session = Session::new(Offline, Recorder::default(), 5);
    assert_eq!(session.snapshot().best_score, 0);
    assert!(session.snapshot().sound_enabled);

    session.toggle_sound();
    session.start(Difficulty::Normal, None);
    let mut events: Vec<GameEvent> = Vec::new();
    for _ in 0..5000 {
        if session.snapshot().screen != Screen::Playing {
            break;
        }
        events.extend(session.frame(FRAME_DT));
    }
    assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert_eq!(session.snapshot().screen, Screen::Ended);
}

#[test]
fn same_seed_same_drops() {
    let mut a = new_session(MemoryStorage::new());
    let mut b = new_session(MemoryStorage::new());
    a.start(Difficulty::Hard, None);
    b.start(Difficulty::Hard, None);
    // Hard spawns every 2 s and a drop needs about 3 s to land, so after
    // 5 s the field still holds live drops
    let mut seen = 0;
    for _ in 0..300 {
        a.frame(FRAME_DT);
        b.frame(FRAME_DT);
        assert_eq!(a.snapshot().drops, b.snapshot().drops);
        seen = seen.max(a.snapshot().drops.len());
    }
    assert_eq!(a.snapshot().screen, Screen::Playing);
    assert!(!a.snapshot().drops.is_empty());
    assert!(seen >= 2);
}

#[test]
fn out_of_range_table_plays_mixed_tables() {
    let mut session = new_session(MemoryStorage::new());
    session.start(Difficulty::Custom, Some(u32::MAX));
    assert_eq!(session.snapshot().fixed_multiplicand, None);
    for _ in 0..400 {
        session.frame(FRAME_DT);
    }
    let state = session.snapshot();
    assert!(!state.drops.is_empty());
    assert!(
        state
            .drops
            .iter()
            .all(|d| Difficulty::Normal.profile().multiplicands.contains(&d.factor_a))
    );
}
