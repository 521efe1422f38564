use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::quiz::TimerHandle;

/// What the main loop reacts to
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Anything that can hand the main loop terminal events
pub trait EventSource: Send + 'static {
    /// Waits at most `timeout`; `Err(Timeout)` means nothing arrived.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread and forwards them over a channel
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || forward_terminal_events(&tx));
        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

// Stops once the terminal errors or the receiving side is gone.
fn forward_terminal_events(tx: &Sender<AppEvent>) {
    while let Ok(ev) = event::read() {
        let app_event = match ev {
            // Windows reports releases too
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
            CtEvent::Resize(_, _) => AppEvent::Resize,
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            return;
        }
    }
}

/// How long the runner waits for input before reporting a tick
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed source for driving the runner without a terminal
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub struct Runner<E: EventSource, T: Ticker> {
    events: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(events: E, ticker: T) -> Self {
        Self { events, ticker }
    }

    /// Next pending event, or `Tick` once the interval passes quietly.
    /// A closed source also reads as `Tick`, so the loop keeps its timers running.
    pub fn step(&self) -> AppEvent {
        self.events
            .recv_timeout(self.ticker.interval())
            .unwrap_or(AppEvent::Tick)
    }
}

/// Turns frequent runner ticks into one countdown tick per `period`.
///
/// At most one countdown is armed. Syncing with a different handle drops the
/// old schedule, so a replaced countdown can never fire again.
#[derive(Debug)]
pub struct Countdown {
    period: Duration,
    armed: Option<(TimerHandle, Instant)>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
        }
    }

    pub fn armed(&self) -> Option<TimerHandle> {
        self.armed.map(|(handle, _)| handle)
    }

    pub fn sync(&mut self, active: Option<TimerHandle>, now: Instant) {
        if self.armed() == active {
            return;
        }
        self.armed = active.map(|handle| (handle, now + self.period));
    }

    /// Returns the armed handle when its period has elapsed, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> Option<TimerHandle> {
        let (handle, due) = self.armed?;
        if now < due {
            return None;
        }
        self.armed = Some((handle, due + self.period));
        Some(handle)
    }
}
