use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::SessionController;
use crate::cue::CueEmitter;
use crate::render::Renderer;

/// How often the event loop wakes up to poll the countdown clock.
pub const TICK_RATE_MS: u64 = 100;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                // Windows reports releases too; only presses drive the session.
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            }
        });

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

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
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

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to the tick interval and returns the next event, or `Tick`
    /// on timeout.
    ///
    /// The interval bounds how long the clock can go unpolled while idle;
    /// under input, each key event polls it as well (see [`handle_event`]).
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// User intent decoded from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    StartPause,
    Reset,
    SkipSet,
    ToggleSound,
    Quit,
}

impl Control {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.code == KeyCode::Char('c')).then_some(Control::Quit);
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Control::StartPause),
            KeyCode::Char('r') => Some(Control::Reset),
            KeyCode::Char('s') => Some(Control::SkipSet),
            KeyCode::Char('m') => Some(Control::ToggleSound),
            KeyCode::Char('q') | KeyCode::Esc => Some(Control::Quit),
            _ => None,
        }
    }
}

/// What the loop should do after handling an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Routes one event into the session.
///
/// Every event first polls the countdown clock, so seconds that fell due
/// are applied before a key acts on the state, and a stream of key presses
/// cannot starve the countdown. Keys then become control operations.
pub fn handle_event<C: CueEmitter, R: Renderer>(
    session: &mut SessionController<C, R>,
    event: AppEvent,
    now: Instant,
) -> Flow {
    let elapsed = session.poll(now);
    if elapsed > 1 {
        tracing::debug!(elapsed, "countdown caught up");
    }

    match event {
        AppEvent::Tick => Flow::Continue,
        AppEvent::Resize => Flow::Redraw,
        AppEvent::Key(key) => match Control::from_key(key) {
            Some(Control::StartPause) => {
                session.start(now);
                Flow::Continue
            }
            Some(Control::Reset) => {
                session.reset();
                Flow::Continue
            }
            Some(Control::SkipSet) => {
                session.skip_set(now);
                Flow::Continue
            }
            Some(Control::ToggleSound) => {
                session.toggle_sound();
                Flow::Continue
            }
            Some(Control::Quit) => Flow::Quit,
            None => Flow::Continue,
        },
    }
}
