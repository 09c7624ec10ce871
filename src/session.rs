use serde::Serialize;

/// Where the session currently is in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Contracting,
    RepResting,
    /// Long rest between sets; `next_set` starts when it runs out.
    SetResting { next_set: usize },
    Finished,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished)
    }
}

/// The single mutable session value.
///
/// Only the scheduler computes new values and only the controller stores
/// them. `remaining_secs` is always the time left in `phase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub phase: Phase,
    pub set_index: usize,
    pub rep_index: u32,
    pub remaining_secs: u32,
    pub running: bool,
}

impl SessionState {
    pub const IDLE: SessionState = SessionState {
        phase: Phase::Idle,
        set_index: 0,
        rep_index: 0,
        remaining_secs: 0,
        running: false,
    };

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True when the clock should be armed for this state.
    pub fn wants_clock(&self) -> bool {
        self.running && self.remaining_secs > 0
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::IDLE
    }
}
