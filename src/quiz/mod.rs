//! Timed ten-round arithmetic quiz.
//!
//! [`QuizSession`] is driven entirely by two external events: a once-per-second
//! tick tagged with the [`TimerHandle`] it was armed for, and an answer
//! submission. Everything else (rendering, pauses between rounds) belongs to
//! the frontend.
pub mod attempt;
pub mod problem;
pub mod session;

pub use attempt::{
    AttemptTracker, Resolution, RoundEvent, RoundPhase, TimerHandle, COUNTDOWN_SECS,
    FIRST_ATTEMPT_POINTS, SECOND_ATTEMPT_POINTS,
};
pub use problem::{Difficulty, Operator, Problem, ProblemGenerator};
pub use session::{compute_rank, Advance, QuizResult, QuizSession, Rank, ROUNDS_PER_QUIZ};
