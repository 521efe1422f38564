use tracing::debug;

use super::problem::Problem;

/// Seconds allowed for each attempt
pub const COUNTDOWN_SECS: u32 = 20;
pub const FIRST_ATTEMPT_POINTS: u32 = 10;
pub const SECOND_ATTEMPT_POINTS: u32 = 5;

/// Identifies one running countdown. Ticks carrying any other handle are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Hands out a fresh handle every time a countdown (re)starts
#[derive(Debug, Default)]
pub struct TimerIssuer {
    next: u64,
}

impl TimerIssuer {
    pub fn issue(&mut self) -> TimerHandle {
        self.next += 1;
        TimerHandle(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct { attempt: u8 },
    Wrong,
    TimedOut,
}

impl Resolution {
    pub fn points(&self) -> u32 {
        match self {
            Resolution::Correct { attempt: 1 } => FIRST_ATTEMPT_POINTS,
            Resolution::Correct { .. } => SECOND_ATTEMPT_POINTS,
            Resolution::Wrong | Resolution::TimedOut => 0,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Resolution::Correct { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingFirstAttempt,
    AwaitingSecondAttempt,
    Resolved(Resolution),
}

/// What a single tick or submit did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    Correct { points: u32 },
    TryAgain,
    Wrong,
    TimedOut,
    Ticked { remaining: u32 },
    Ignored,
}

/// Per-question attempt and countdown state
#[derive(Debug, Clone)]
pub struct AttemptTracker {
    problem: Problem,
    phase: RoundPhase,
    countdown_secs: u32,
    seconds_remaining: u32,
    timer: Option<TimerHandle>,
}

impl AttemptTracker {
    pub fn start(problem: Problem, countdown_secs: u32, timers: &mut TimerIssuer) -> Self {
        Self {
            problem,
            phase: RoundPhase::AwaitingFirstAttempt,
            countdown_secs,
            seconds_remaining: countdown_secs,
            timer: Some(timers.issue()),
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn attempt_number(&self) -> u8 {
        match self.phase {
            RoundPhase::AwaitingFirstAttempt => 1,
            RoundPhase::AwaitingSecondAttempt => 2,
            RoundPhase::Resolved(Resolution::Correct { attempt }) => attempt,
            RoundPhase::Resolved(_) => 2,
        }
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self.phase {
            RoundPhase::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution().is_some()
    }

    /// One second elapsed on the countdown identified by `handle`
    pub fn tick(&mut self, handle: TimerHandle) -> RoundEvent {
        if self.timer != Some(handle) {
            debug!(?handle, active = ?self.timer, "ignoring stale tick");
            return RoundEvent::Ignored;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining > 0 {
            return RoundEvent::Ticked {
                remaining: self.seconds_remaining,
            };
        }

        self.resolve(Resolution::TimedOut);
        RoundEvent::TimedOut
    }

    pub fn submit(&mut self, answer: &str, timers: &mut TimerIssuer) -> RoundEvent {
        let attempt = match self.phase {
            RoundPhase::AwaitingFirstAttempt => 1,
            RoundPhase::AwaitingSecondAttempt => 2,
            RoundPhase::Resolved(_) => return RoundEvent::Ignored,
        };

        if self.problem.is_correct(answer) {
            let resolution = Resolution::Correct { attempt };
            self.resolve(resolution);
            return RoundEvent::Correct {
                points: resolution.points(),
            };
        }

        if attempt == 1 {
            self.phase = RoundPhase::AwaitingSecondAttempt;
            self.seconds_remaining = self.countdown_secs;
            self.timer = Some(timers.issue());
            debug!(problem = %self.problem, "first attempt wrong, countdown restarted");
            RoundEvent::TryAgain
        } else {
            self.resolve(Resolution::Wrong);
            RoundEvent::Wrong
        }
    }

    fn resolve(&mut self, resolution: Resolution) {
        self.phase = RoundPhase::Resolved(resolution);
        self.timer = None;
    }
}
