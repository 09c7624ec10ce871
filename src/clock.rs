use std::time::{Duration, Instant};

/// Length of one logical tick.
pub const TICK: Duration = Duration::from_secs(1);

/// Once-per-second countdown timer measured against a monotonic clock.
///
/// At most one timer is armed at a time: `start` replaces whatever was armed
/// before, `cancel` disarms it. The caller polls with the current instant and
/// drains the ticks that fell due since the last poll. Ticks are counted from
/// the arming instant, not from the poll, so scheduling jitter in the polling
/// loop never accumulates across a session.
#[derive(Debug, Default, Clone)]
pub struct CountdownClock {
    anchor: Option<Instant>,
}

impl CountdownClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer from `now`, cancelling any timer already armed.
    pub fn start(&mut self, now: Instant) {
        self.anchor = Some(now);
    }

    /// Disarms the timer. Seconds not yet reported are discarded.
    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    pub fn is_armed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Consumes the next tick if it is due by `now`, returning the instant
    /// it fell due.
    ///
    /// Call in a loop to catch up after a slow poll. Re-arming with the
    /// returned instant keeps the next tick exactly one second later.
    pub fn next_due(&mut self, now: Instant) -> Option<Instant> {
        let due = self.anchor? + TICK;
        if due > now {
            return None;
        }
        self.anchor = Some(due);
        Some(due)
    }
}
