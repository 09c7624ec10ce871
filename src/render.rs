use serde::Serialize;

use crate::plan::{ExercisePlan, Intensity};
use crate::scheduler;
use crate::session::{Phase, SessionState};

/// Label for the start/pause control in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum ControlLabel {
    Start,
    Pause,
    Restart,
}

/// Read-only projection of the session handed to a [`Renderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub running: bool,
    pub set_index: usize,
    /// 1-based; stays on the last set once finished.
    pub set_ordinal: usize,
    pub total_sets: usize,
    /// 1-based.
    pub rep_ordinal: u32,
    pub reps_in_set: u32,
    pub intensity: Option<Intensity>,
    pub can_skip: bool,
    pub control: ControlLabel,
    pub sound_on: bool,
}

impl Snapshot {
    pub fn new(state: &SessionState, plan: &ExercisePlan, sound_on: bool) -> Self {
        let set_index = state.set_index.min(plan.len().saturating_sub(1));
        let set = plan.get(set_index);
        let control = match (state.phase, state.running) {
            (Phase::Finished, _) => ControlLabel::Restart,
            (_, true) => ControlLabel::Pause,
            (_, false) => ControlLabel::Start,
        };
        // Skipping out of the final set is offered only while resting before
        // it, where it finishes the session early.
        let in_last_set = !scheduler::has_next_set(state, plan);
        let can_skip = !state.is_finished()
            && (!in_last_set || matches!(state.phase, Phase::SetResting { .. }));

        Self {
            phase: state.phase,
            remaining_secs: state.remaining_secs,
            running: state.running,
            set_index,
            set_ordinal: set_index + 1,
            total_sets: plan.len(),
            rep_ordinal: state.rep_index + 1,
            reps_in_set: set.map(|s| s.reps).unwrap_or(0),
            intensity: set.map(|s| s.intensity),
            can_skip,
            control,
            sound_on,
        }
    }

    /// Headline for the current phase.
    pub fn action_text(&self) -> String {
        match self.phase {
            Phase::Idle => "Ready to begin?".to_string(),
            Phase::Contracting => match self.intensity {
                Some(intensity) => format!("Contract! ({intensity} Intensity)"),
                None => "Contracting...".to_string(),
            },
            Phase::RepResting => "Rest!".to_string(),
            Phase::SetResting { .. } => "Set Rest!".to_string(),
            Phase::Finished => "Exercise Complete!".to_string(),
        }
    }

    /// `Set 2/4 | Rep 3/12`
    pub fn progress_text(&self) -> String {
        format!(
            "Set {}/{} | Rep {}/{}",
            self.set_ordinal, self.total_sets, self.rep_ordinal, self.reps_in_set
        )
    }

    /// Two-digit countdown, as shown in the dial.
    pub fn countdown_text(&self) -> String {
        format!("{:02}", self.remaining_secs)
    }

    /// Set highlighted in the plan list, if any.
    pub fn highlighted_set(&self) -> Option<usize> {
        (self.phase != Phase::Finished).then_some(self.set_index)
    }
}

/// Draws session snapshots. Called after every state change.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Keeps every snapshot it is given; for headless sessions and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub frames: Vec<Snapshot>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}
