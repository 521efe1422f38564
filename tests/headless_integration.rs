use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use skillfolio::app::{QuizApp, QuizScreen};
use skillfolio::quiz::{Difficulty, Rank};
use skillfolio::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};

const STEP: Duration = Duration::from_millis(100);

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

// Headless quiz using the runtime Runner without a TTY. Time is simulated: every
// runner step moves the clock on by one tick interval.
#[test]
fn headless_quiz_runs_to_results() {
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(1)));

    let mut now = Instant::now();
    let mut app = QuizApp::new(Difficulty::Easy, 20);

    // Start page -> difficulty menu -> Moderate
    tx.send(key(KeyCode::Char('s'))).unwrap();
    tx.send(key(KeyCode::Char('2'))).unwrap();
    for _ in 0..2 {
        if let AppEvent::Key(k) = runner.step() {
            app.on_key(k, now);
        }
    }
    assert_eq!(app.screen, QuizScreen::Question);
    assert_eq!(app.difficulty(), Difficulty::Moderate);

    for round in 1..=10u32 {
        let session = app.session().unwrap();
        assert_eq!(session.current_round(), round);

        // Odd rounds are answered straight away, even rounds need a second try
        let expected = session.problem().expected().to_string();
        if round % 2 == 0 {
            tx.send(key(KeyCode::Char('x'))).unwrap();
            tx.send(key(KeyCode::Enter)).unwrap();
        }
        for c in expected.chars() {
            tx.send(key(KeyCode::Char(c))).unwrap();
        }
        tx.send(key(KeyCode::Enter)).unwrap();

        // Drive events and ticks until the pause is over and the next round (or results) shows
        for _ in 0..100u32 {
            match runner.step() {
                AppEvent::Key(k) => app.on_key(k, now),
                AppEvent::Tick => {
                    now += STEP;
                    app.on_tick(now);
                }
                AppEvent::Resize => {}
            }
            let moved_on = app.screen == QuizScreen::Results
                || app.session().is_some_and(|s| s.current_round() > round);
            if moved_on {
                break;
            }
        }
    }

    assert_eq!(app.screen, QuizScreen::Results);
    let result = app.result().unwrap();
    assert_eq!(result.correct_count, 10);
    assert_eq!(result.wrong_count, 0);
    assert_eq!(result.score, 5 * 10 + 5 * 5);
    assert_eq!(result.rank, Rank::B);
}

#[test]
fn headless_quiz_times_out_without_input() {
    let (_tx, rx) = mpsc::channel::<AppEvent>();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(1)));

    let mut now = Instant::now();
    let mut app = QuizApp::new(Difficulty::Easy, 2);
    app.start_quiz(Difficulty::Easy, now);

    // 2s countdown plus the feedback pause, all on simulated ticks
    for _ in 0..40u32 {
        if let AppEvent::Tick = runner.step() {
            now += STEP;
            app.on_tick(now);
        }
    }

    let session = app.session().unwrap();
    assert_eq!(session.wrong_count(), 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.current_round(), 2);
}
