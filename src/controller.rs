//! Session control surface.
//!
//! [`SessionController`] owns the one [`SessionState`] and the one countdown
//! clock. Control operations and elapsed clock ticks all funnel through it;
//! each applies at most one scheduler decision, plays the resulting cue, and
//! then renders exactly once.

use std::time::Instant;

use crate::clock::CountdownClock;
use crate::cue::CueEmitter;
use crate::plan::ExercisePlan;
use crate::render::{Renderer, Snapshot};
use crate::scheduler::{self, Transition};
use crate::session::{Phase, SessionState};

pub struct SessionController<C: CueEmitter, R: Renderer> {
    plan: ExercisePlan,
    set_rest_secs: u32,
    state: SessionState,
    clock: CountdownClock,
    cues: C,
    renderer: R,
}

impl<C: CueEmitter, R: Renderer> SessionController<C, R> {
    pub fn new(plan: ExercisePlan, set_rest_secs: u32, cues: C, renderer: R) -> Self {
        Self {
            plan,
            set_rest_secs,
            state: SessionState::IDLE,
            clock: CountdownClock::new(),
            cues,
            renderer,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.state, &self.plan, self.cues.is_enabled())
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn clock_armed(&self) -> bool {
        self.clock.is_armed()
    }

    /// Renders the current state without changing it.
    pub fn refresh(&mut self) {
        let snapshot = self.snapshot();
        self.renderer.render(&snapshot);
    }

    /// Play/pause toggle.
    ///
    /// From `Idle` this kicks off the first contraction; from `Finished` it
    /// resets and starts over. Otherwise it pauses or resumes without
    /// touching the remaining time.
    pub fn start(&mut self, now: Instant) {
        if self.state.is_finished() {
            tracing::info!("restarting finished session");
            self.clock.cancel();
            self.state = SessionState::IDLE;
        }

        if self.state.is_idle() {
            let kickoff = SessionState {
                running: true,
                ..self.state
            };
            match scheduler::advance(&kickoff, &self.plan, self.set_rest_secs) {
                Some(transition) => {
                    tracing::info!(sets = self.plan.len(), "session started");
                    self.apply(transition);
                    self.arm(now);
                }
                None => tracing::warn!("plan has no first set, staying idle"),
            }
        } else {
            self.state.running = !self.state.running;
            if self.state.running {
                tracing::debug!(remaining = self.state.remaining_secs, "resumed");
                self.arm(now);
            } else {
                tracing::debug!(remaining = self.state.remaining_secs, "paused");
                self.clock.cancel();
            }
        }

        self.refresh();
    }

    /// Back to the initial idle state from anywhere.
    pub fn reset(&mut self) {
        self.clock.cancel();
        self.state = SessionState::IDLE;
        tracing::info!("session reset");
        self.refresh();
    }

    /// Abandons the current set: rest before the next one (and keep
    /// running), or finish when there is no next set.
    pub fn skip_set(&mut self, now: Instant) {
        self.clock.cancel();
        match scheduler::skip_set(&self.state, &self.plan, self.set_rest_secs) {
            Some(transition) => {
                tracing::debug!(from = scheduler::current_set(&self.state), "skipping set");
                self.apply(transition);
                self.arm(now);
            }
            None => tracing::debug!(phase = %self.state.phase, "nothing to skip"),
        }
        self.refresh();
    }

    pub fn toggle_sound(&mut self) {
        let enabled = !self.cues.is_enabled();
        self.cues.set_enabled(enabled);
        tracing::debug!(enabled, "sound toggled");
        self.refresh();
    }

    /// Feeds every tick that fell due by `now` into the session.
    ///
    /// Returns the number of ticks applied.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut applied = 0;
        while let Some(due) = self.clock.next_due(now) {
            self.on_tick(due);
            applied += 1;
        }
        applied
    }

    /// One elapsed second of the active phase.
    ///
    /// `at` is the instant the tick fell due; the clock for the next phase is
    /// armed from there so back-to-back phases stay on the same cadence.
    pub fn on_tick(&mut self, at: Instant) {
        if !self.state.wants_clock() {
            self.clock.cancel();
            return;
        }

        self.state.remaining_secs -= 1;
        if self.state.remaining_secs > 0 {
            self.refresh();
            return;
        }

        self.clock.cancel();
        match scheduler::advance(&self.state, &self.plan, self.set_rest_secs) {
            Some(transition) => {
                self.apply(transition);
                self.refresh();
                self.arm(at);
            }
            None => {
                self.state.running = false;
                self.refresh();
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        let Transition { state, cue } = transition;
        tracing::debug!(
            from = %self.state.phase,
            to = %state.phase,
            set = state.set_index + 1,
            rep = state.rep_index + 1,
            remaining = state.remaining_secs,
            "phase transition"
        );
        self.state = state;
        if let Phase::Finished = state.phase {
            tracing::info!("session finished");
        }
        self.cues.play(cue);
    }

    fn arm(&mut self, from: Instant) {
        if self.state.wants_clock() {
            self.clock.start(from);
        } else {
            self.clock.cancel();
        }
    }
}
