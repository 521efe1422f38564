use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::quiz::{
    Advance, Difficulty, QuizResult, QuizSession, RoundEvent, FIRST_ATTEMPT_POINTS, ROUNDS_PER_QUIZ,
    SECOND_ATTEMPT_POINTS,
};
use crate::runtime::Countdown;

/// Feedback stays on screen this long before the next question
pub const RESOLVED_PAUSE: Duration = Duration::from_millis(1200);
const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);
const MAX_ANSWER_LEN: usize = 12;

pub const START_ITEMS: [&str; 3] = ["Start", "How to Play", "Exit"];

/// How-to-play text for a quiz with the given per-attempt countdown
pub fn instructions(countdown_secs: u32) -> String {
    format!(
        "1. Choose your difficulty (Easy / Moderate / Advanced)\n\n\
         2. You get {ROUNDS_PER_QUIZ} questions with {countdown_secs} seconds each\n\n\
         3. Correct (1st try) = +{FIRST_ATTEMPT_POINTS} pts | 2nd try = +{SECOND_ATTEMPT_POINTS} pts\n\n\
         4. Wrong or timeout = 0 pts\n\n\
         5. Final rank based on total score!"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScreen {
    Start { selected: usize },
    Instructions,
    DifficultyMenu { selected: usize },
    Question,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct { points: u32 },
    TryAgain,
    WrongAgain,
    TimesUp,
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::Correct { points } => format!("Correct! +{points}"),
            Feedback::TryAgain => "Wrong! Try again!".to_string(),
            Feedback::WrongAgain => "Wrong again!".to_string(),
            Feedback::TimesUp => "Time's up!".to_string(),
        }
    }
}

/// Quiz frontend state: menus, the typed answer, and the countdown schedule
#[derive(Debug)]
pub struct QuizApp {
    pub screen: QuizScreen,
    session: Option<QuizSession>,
    countdown: Countdown,
    input: String,
    feedback: Option<Feedback>,
    advance_at: Option<Instant>,
    difficulty: Difficulty,
    countdown_secs: u32,
    should_quit: bool,
}

impl QuizApp {
    pub fn new(difficulty: Difficulty, countdown_secs: u32) -> Self {
        Self {
            screen: QuizScreen::Start { selected: 0 },
            session: None,
            countdown: Countdown::new(COUNTDOWN_PERIOD),
            input: String::new(),
            feedback: None,
            advance_at: None,
            difficulty,
            countdown_secs,
            should_quit: false,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn instructions(&self) -> String {
        instructions(self.countdown_secs)
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.session.as_ref().and_then(|s| s.result())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn start_quiz(&mut self, difficulty: Difficulty, now: Instant) {
        self.difficulty = difficulty;
        match self.session.as_mut() {
            Some(session) => session.start(difficulty),
            None => {
                self.session = Some(QuizSession::with_rng(
                    difficulty,
                    self.countdown_secs,
                    rand::thread_rng(),
                ))
            }
        }
        self.input.clear();
        self.feedback = None;
        self.advance_at = None;
        self.screen = QuizScreen::Question;
        self.sync_countdown(now);
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        match self.screen {
            QuizScreen::Start { selected } => match key.code {
                KeyCode::Up => {
                    self.screen = QuizScreen::Start {
                        selected: selected.saturating_sub(1),
                    }
                }
                KeyCode::Down => {
                    self.screen = QuizScreen::Start {
                        selected: (selected + 1).min(START_ITEMS.len() - 1),
                    }
                }
                KeyCode::Enter => self.activate_start_item(selected),
                KeyCode::Char('s') => self.activate_start_item(0),
                KeyCode::Char('h') => self.activate_start_item(1),
                KeyCode::Char('q') | KeyCode::Esc => self.activate_start_item(2),
                _ => {}
            },
            QuizScreen::Instructions => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter | KeyCode::Char('b')
                ) {
                    self.show_start_page();
                }
            }
            QuizScreen::DifficultyMenu { selected } => match key.code {
                KeyCode::Up => {
                    self.screen = QuizScreen::DifficultyMenu {
                        selected: selected.saturating_sub(1),
                    }
                }
                KeyCode::Down => {
                    self.screen = QuizScreen::DifficultyMenu {
                        selected: (selected + 1).min(Difficulty::ALL.len() - 1),
                    }
                }
                KeyCode::Enter => self.start_quiz(Difficulty::ALL[selected], now),
                KeyCode::Char(c @ '1'..='3') => {
                    let idx = c as usize - '1' as usize;
                    self.start_quiz(Difficulty::ALL[idx], now);
                }
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.show_start_page(),
                _ => {}
            },
            QuizScreen::Question => self.on_question_key(key, now),
            QuizScreen::Results => match key.code {
                KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('r') => self.show_start_page(),
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    /// Returns true when something visible changed
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if self.screen != QuizScreen::Question {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        if let Some(due) = self.advance_at {
            if now < due {
                return false;
            }
            self.advance_at = None;
            match session.advance() {
                Advance::NextRound(round) => {
                    debug!(round, "next question");
                    self.input.clear();
                    self.feedback = None;
                }
                Advance::Finished(_) => self.screen = QuizScreen::Results,
                Advance::NotReady => {}
            }
            self.sync_countdown(now);
            return true;
        }

        let Some(handle) = self.countdown.poll(now) else {
            return false;
        };
        if session.tick(handle) == RoundEvent::TimedOut {
            self.feedback = Some(Feedback::TimesUp);
            self.advance_at = Some(now + RESOLVED_PAUSE);
        }
        self.sync_countdown(now);
        true
    }

    fn on_question_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Esc {
            self.show_start_page();
            return;
        }
        // Input is frozen while the resolved round's feedback is showing
        if self.advance_at.is_some() {
            return;
        }

        match key.code {
            KeyCode::Char(c) if !c.is_control() && self.input.chars().count() < MAX_ANSWER_LEN => {
                self.input.push(c)
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(now),
            _ => {}
        }
    }

    fn submit(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let event = session.submit(&self.input);
        self.input.clear();

        self.feedback = match event {
            RoundEvent::Correct { points } => Some(Feedback::Correct { points }),
            RoundEvent::TryAgain => Some(Feedback::TryAgain),
            RoundEvent::Wrong => Some(Feedback::WrongAgain),
            RoundEvent::TimedOut => Some(Feedback::TimesUp),
            RoundEvent::Ticked { .. } | RoundEvent::Ignored => self.feedback,
        };
        if session.round().is_resolved() {
            self.advance_at = Some(now + RESOLVED_PAUSE);
        }
        self.sync_countdown(now);
    }

    fn activate_start_item(&mut self, idx: usize) {
        match idx {
            0 => {
                let selected = Difficulty::ALL
                    .iter()
                    .position(|d| *d == self.difficulty)
                    .unwrap_or_default();
                self.screen = QuizScreen::DifficultyMenu { selected };
            }
            1 => self.screen = QuizScreen::Instructions,
            _ => self.should_quit = true,
        }
    }

    /// Leaves any running quiz; its countdown is dropped with it.
    fn show_start_page(&mut self) {
        self.screen = QuizScreen::Start { selected: 0 };
        self.advance_at = None;
        self.countdown.sync(None, Instant::now());
    }

    fn sync_countdown(&mut self, now: Instant) {
        let active = self.session.as_ref().and_then(|s| s.active_timer());
        self.countdown.sync(active, now);
    }
}
