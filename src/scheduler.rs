//! Phase scheduling.
//!
//! Pure transition logic: given the current [`SessionState`] and the plan,
//! compute the next state and the cue that announces it. Nothing here reads
//! the clock or touches the terminal, so the whole table is testable by
//! calling [`advance`] in a loop.
//!
//! ```text
//! Idle -> Contracting -> RepResting -> Contracting ... (reps left)
//!                                   -> SetResting -> Contracting (sets left)
//!                                   -> Finished
//! ```

use crate::cue::Cue;
use crate::plan::SetSpec;
use crate::session::{Phase, SessionState};

/// Result of a scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub cue: Cue,
}

impl Transition {
    fn new(state: SessionState, cue: Cue) -> Self {
        Self { state, cue }
    }
}

fn finished(state: &SessionState) -> SessionState {
    SessionState {
        phase: Phase::Finished,
        remaining_secs: 0,
        running: false,
        ..*state
    }
}

/// Next phase once the current one has run out (or to leave `Idle`).
///
/// Returns `None` when there is nothing to do: the session is finished, or
/// the plan has no set where one is needed. The `running` flag is carried
/// over unchanged except on entering `Finished`, which always stops.
pub fn advance(
    state: &SessionState,
    sets: &[SetSpec],
    set_rest_secs: u32,
) -> Option<Transition> {
    match state.phase {
        Phase::Idle => {
            let first = sets.first()?;
            Some(Transition::new(
                SessionState {
                    phase: Phase::Contracting,
                    set_index: 0,
                    rep_index: 0,
                    remaining_secs: first.contract_secs,
                    running: state.running,
                },
                Cue::Contract,
            ))
        }
        Phase::Contracting => {
            let set = sets.get(state.set_index)?;
            Some(Transition::new(
                SessionState {
                    phase: Phase::RepResting,
                    remaining_secs: set.rest_secs,
                    ..*state
                },
                Cue::Rest,
            ))
        }
        Phase::RepResting => {
            let set = sets.get(state.set_index)?;
            let has_more_reps = state.rep_index + 1 < set.reps;
            let has_more_sets = state.set_index + 1 < sets.len();

            if has_more_reps {
                Some(Transition::new(
                    SessionState {
                        phase: Phase::Contracting,
                        rep_index: state.rep_index + 1,
                        remaining_secs: set.contract_secs,
                        ..*state
                    },
                    Cue::Contract,
                ))
            } else if has_more_sets {
                Some(Transition::new(
                    SessionState {
                        phase: Phase::SetResting {
                            next_set: state.set_index + 1,
                        },
                        rep_index: 0,
                        remaining_secs: set_rest_secs,
                        ..*state
                    },
                    Cue::SetRest,
                ))
            } else {
                Some(Transition::new(finished(state), Cue::Finish))
            }
        }
        Phase::SetResting { next_set } => {
            let set = sets.get(next_set)?;
            Some(Transition::new(
                SessionState {
                    phase: Phase::Contracting,
                    set_index: next_set,
                    rep_index: 0,
                    remaining_secs: set.contract_secs,
                    running: state.running,
                },
                Cue::Contract,
            ))
        }
        Phase::Finished => None,
    }
}

/// Index of the set a skip abandons.
///
/// While resting between sets this is the set about to begin, so skipping
/// during a set rest skips the upcoming set rather than re-entering the
/// same rest.
pub fn current_set(state: &SessionState) -> usize {
    match state.phase {
        Phase::SetResting { next_set } => next_set,
        _ => state.set_index,
    }
}

/// Whether a skip would land on another set rather than finish the session.
pub fn has_next_set(state: &SessionState, sets: &[SetSpec]) -> bool {
    current_set(state) + 1 < sets.len()
}

/// Forced transition that abandons the current set.
///
/// With a set left, lands in `SetResting` positioned on that set and
/// running; otherwise finishes. A finished session or an empty plan is left
/// alone.
pub fn skip_set(
    state: &SessionState,
    sets: &[SetSpec],
    set_rest_secs: u32,
) -> Option<Transition> {
    if state.is_finished() || sets.is_empty() {
        return None;
    }
    let next = current_set(state) + 1;
    if next < sets.len() {
        Some(Transition::new(
            SessionState {
                phase: Phase::SetResting { next_set: next },
                set_index: next,
                rep_index: 0,
                remaining_secs: set_rest_secs,
                running: true,
            },
            Cue::SetRest,
        ))
    } else {
        Some(Transition::new(finished(state), Cue::Finish))
    }
}
