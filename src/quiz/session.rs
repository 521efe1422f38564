use rand::{rngs::ThreadRng, Rng};
use tracing::info;

use super::attempt::{AttemptTracker, Resolution, RoundEvent, TimerHandle, TimerIssuer, COUNTDOWN_SECS};
use super::problem::{Difficulty, Problem, ProblemGenerator};

pub const ROUNDS_PER_QUIZ: u32 = 10;

/// Letter grade for a finished quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum_macros::Display)]
pub enum Rank {
    #[strum(serialize = "D")]
    D,
    #[strum(serialize = "C")]
    C,
    #[strum(serialize = "B")]
    B,
    #[strum(serialize = "A")]
    A,
    #[strum(serialize = "A+")]
    APlus,
}

/// Scores above 100 cannot occur, so `A+` means a perfect quiz.
pub fn compute_rank(score: u32) -> Rank {
    match score {
        s if s >= 100 => Rank::APlus,
        s if s >= 85 => Rank::A,
        s if s >= 75 => Rank::B,
        s if s >= 60 => Rank::C,
        _ => Rank::D,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub difficulty: Difficulty,
    pub score: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub rank: Rank,
}

/// Outcome of moving past a resolved round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextRound(u32),
    Finished(QuizResult),
    NotReady,
}

/// A ten-round quiz. Owns the only live countdown handle.
#[derive(Debug)]
pub struct QuizSession<R: Rng = ThreadRng> {
    generator: ProblemGenerator<R>,
    timers: TimerIssuer,
    countdown_secs: u32,
    difficulty: Difficulty,
    current_round: u32,
    score: u32,
    correct_count: u32,
    wrong_count: u32,
    round: AttemptTracker,
    result: Option<QuizResult>,
}

impl QuizSession<ThreadRng> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, COUNTDOWN_SECS, rand::thread_rng())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(difficulty: Difficulty, countdown_secs: u32, rng: R) -> Self {
        let mut generator = ProblemGenerator::new(rng);
        let mut timers = TimerIssuer::default();
        let round = AttemptTracker::start(generator.generate(difficulty), countdown_secs, &mut timers);

        info!(%difficulty, "quiz started");

        Self {
            generator,
            timers,
            countdown_secs,
            difficulty,
            current_round: 1,
            score: 0,
            correct_count: 0,
            wrong_count: 0,
            round,
            result: None,
        }
    }

    /// Reset every counter and begin round one at `difficulty`
    pub fn start(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.current_round = 1;
        self.score = 0;
        self.correct_count = 0;
        self.wrong_count = 0;
        self.result = None;
        self.begin_round();
        info!(%difficulty, "quiz restarted");
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn problem(&self) -> &Problem {
        self.round.problem()
    }

    pub fn round(&self) -> &AttemptTracker {
        &self.round
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// The countdown the presentation layer should be ticking, if any
    pub fn active_timer(&self) -> Option<TimerHandle> {
        if self.is_finished() {
            None
        } else {
            self.round.timer()
        }
    }

    pub fn submit(&mut self, answer: &str) -> RoundEvent {
        if self.is_finished() {
            return RoundEvent::Ignored;
        }
        let event = self.round.submit(answer, &mut self.timers);
        self.settle();
        event
    }

    pub fn tick(&mut self, handle: TimerHandle) -> RoundEvent {
        if self.is_finished() {
            return RoundEvent::Ignored;
        }
        let event = self.round.tick(handle);
        self.settle();
        event
    }

    /// Move on once the current round has resolved
    pub fn advance(&mut self) -> Advance {
        if let Some(result) = self.result {
            return Advance::Finished(result);
        }
        if !self.round.is_resolved() {
            return Advance::NotReady;
        }

        if self.current_round < ROUNDS_PER_QUIZ {
            self.current_round += 1;
            self.begin_round();
            Advance::NextRound(self.current_round)
        } else {
            let result = QuizResult {
                difficulty: self.difficulty,
                score: self.score,
                correct_count: self.correct_count,
                wrong_count: self.wrong_count,
                rank: compute_rank(self.score),
            };
            info!(score = result.score, rank = %result.rank, "quiz finished");
            self.result = Some(result);
            Advance::Finished(result)
        }
    }

    fn begin_round(&mut self) {
        let problem = self.generator.generate(self.difficulty);
        self.round = AttemptTracker::start(problem, self.countdown_secs, &mut self.timers);
    }

    // Counters move once per round: a round is folded in only while
    // resolved rounds outnumber the tallies.
    fn settle(&mut self) {
        let Some(resolution) = self.round.resolution() else {
            return;
        };
        if self.correct_count + self.wrong_count >= self.current_round {
            return;
        }

        self.score += resolution.points();
        match resolution {
            Resolution::Correct { .. } => self.correct_count += 1,
            Resolution::Wrong | Resolution::TimedOut => self.wrong_count += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    fn session(seed: u64) -> QuizSession<StdRng> {
        QuizSession::with_rng(Difficulty::Easy, COUNTDOWN_SECS, StdRng::seed_from_u64(seed))
    }

    fn answer(session: &QuizSession<StdRng>) -> String {
        session.problem().expected().to_string()
    }

    #[test]
    fn test_compute_rank_thresholds() {
        assert_eq!(compute_rank(100), Rank::APlus);
        assert_eq!(compute_rank(95), Rank::A);
        assert_eq!(compute_rank(85), Rank::A);
        assert_eq!(compute_rank(80), Rank::B);
        assert_eq!(compute_rank(75), Rank::B);
        assert_eq!(compute_rank(70), Rank::C);
        assert_eq!(compute_rank(60), Rank::C);
        assert_eq!(compute_rank(55), Rank::D);
        assert_eq!(compute_rank(0), Rank::D);
    }

    #[test]
    fn test_rank_is_monotonic_in_score() {
        for score in 0..100 {
            assert!(compute_rank(score) <= compute_rank(score + 1));
        }
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::APlus.to_string(), "A+");
        assert_eq!(Rank::C.to_string(), "C");
    }

    #[test]
    fn test_new_session_state() {
        let quiz = session(1);

        assert_eq!(quiz.current_round(), 1);
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.correct_count() + quiz.wrong_count(), 0);
        assert!(quiz.active_timer().is_some());
        assert!(!quiz.is_finished());
    }

    #[test]
    fn test_perfect_quiz_ranks_a_plus() {
        let mut quiz = session(2);

        for round in 1..=ROUNDS_PER_QUIZ {
            assert_eq!(quiz.current_round(), round);
            let reply = answer(&quiz);
            assert_eq!(quiz.submit(&reply), RoundEvent::Correct { points: 10 });
            quiz.advance();
        }

        let result = quiz.result().unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.correct_count, 10);
        assert_eq!(result.wrong_count, 0);
        assert_eq!(result.rank, Rank::APlus);
        assert_eq!(quiz.active_timer(), None);
    }

    #[test]
    fn test_counts_track_resolved_rounds() {
        let mut quiz = session(3);

        for round in 1..=ROUNDS_PER_QUIZ {
            assert_eq!(quiz.correct_count() + quiz.wrong_count(), round - 1);
            match round % 3 {
                0 => {
                    quiz.submit("nope");
                    quiz.submit("nope");
                }
                1 => {
                    let reply = answer(&quiz);
                    quiz.submit("nope");
                    quiz.submit(&reply);
                }
                _ => {
                    let handle = quiz.active_timer().unwrap();
                    for _ in 0..COUNTDOWN_SECS {
                        quiz.tick(handle);
                    }
                }
            }
            assert_eq!(quiz.correct_count() + quiz.wrong_count(), round);
            quiz.advance();
        }

        let result = quiz.result().unwrap();
        // rounds 1,4,7,10 correct on attempt two
        assert_eq!(result.correct_count, 4);
        assert_eq!(result.wrong_count, 6);
        assert_eq!(result.score, 20);
        assert_eq!(result.rank, Rank::D);
    }

    #[test]
    fn test_advance_before_resolution_is_noop() {
        let mut quiz = session(4);
        let problem = *quiz.problem();

        assert_eq!(quiz.advance(), Advance::NotReady);
        assert_eq!(quiz.current_round(), 1);
        assert_eq!(*quiz.problem(), problem);
    }

    #[test]
    fn test_round_settles_only_once() {
        let mut quiz = session(5);
        let reply = answer(&quiz);
        let handle = quiz.active_timer().unwrap();

        quiz.submit(&reply);
        quiz.submit(&reply);
        quiz.tick(handle);

        assert_eq!(quiz.score(), 10);
        assert_eq!(quiz.correct_count(), 1);
        assert_eq!(quiz.wrong_count(), 0);
    }

    #[test]
    fn test_stale_handle_from_previous_round_is_ignored() {
        let mut quiz = session(6);
        let old = quiz.active_timer().unwrap();
        let reply = answer(&quiz);
        quiz.submit(&reply);
        assert_matches!(quiz.advance(), Advance::NextRound(2));

        let remaining = quiz.round().seconds_remaining();
        assert_eq!(quiz.tick(old), RoundEvent::Ignored);
        assert_eq!(quiz.round().seconds_remaining(), remaining);
    }

    #[test]
    fn test_start_resets_session() {
        let mut quiz = session(7);
        let reply = answer(&quiz);
        quiz.submit(&reply);
        quiz.advance();

        quiz.start(Difficulty::Advanced);

        assert_eq!(quiz.difficulty(), Difficulty::Advanced);
        assert_eq!(quiz.current_round(), 1);
        assert_eq!(quiz.score(), 0);
        assert!(Difficulty::Advanced
            .operand_range()
            .contains(&quiz.problem().operand_a));
    }

    #[test]
    fn test_finished_session_ignores_input() {
        let mut quiz = session(8);
        for _ in 0..ROUNDS_PER_QUIZ {
            quiz.submit("x");
            quiz.submit("x");
            quiz.advance();
        }

        assert!(quiz.is_finished());
        assert_eq!(quiz.submit("1"), RoundEvent::Ignored);
        assert_matches!(quiz.advance(), Advance::Finished(QuizResult { score: 0, .. }));
    }
}
