use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::error::PlanError;

/// Rest between consecutive sets when nothing else is configured.
pub const DEFAULT_SET_REST_SECS: u32 = 30;

/// Display-only effort label for a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

/// One planned set: `reps` cycles of contract followed by rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSpec {
    pub set_id: u32,
    pub reps: u32,
    pub contract_secs: u32,
    pub rest_secs: u32,
    pub intensity: Intensity,
}

impl SetSpec {
    pub fn new(
        set_id: u32,
        reps: u32,
        contract_secs: u32,
        rest_secs: u32,
        intensity: Intensity,
    ) -> Self {
        Self {
            set_id,
            reps,
            contract_secs,
            rest_secs,
            intensity,
        }
    }

    /// Seconds spent in this set, contractions and rep rests included.
    pub fn duration_secs(&self) -> u64 {
        u64::from(self.reps) * (u64::from(self.contract_secs) + u64::from(self.rest_secs))
    }
}

/// Ordered, validated, immutable list of sets.
///
/// Construction (and deserialization) rejects empty plans, ids that are not
/// `1..=n` in order, and zero reps or durations, so the scheduler only ever
/// sees well-formed plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SetSpec>", into = "Vec<SetSpec>")]
pub struct ExercisePlan {
    sets: Vec<SetSpec>,
}

impl ExercisePlan {
    pub fn new(sets: Vec<SetSpec>) -> Result<Self, PlanError> {
        if sets.is_empty() {
            return Err(PlanError::Empty);
        }
        for (position, set) in sets.iter().enumerate() {
            let expected = position as u32 + 1;
            if set.set_id != expected {
                return Err(PlanError::NonContiguousId {
                    position,
                    expected,
                    found: set.set_id,
                });
            }
            if set.reps == 0 {
                return Err(PlanError::ZeroReps { set_id: set.set_id });
            }
            if set.contract_secs == 0 {
                return Err(PlanError::ZeroDuration {
                    set_id: set.set_id,
                    field: "contraction",
                });
            }
            if set.rest_secs == 0 {
                return Err(PlanError::ZeroDuration {
                    set_id: set.set_id,
                    field: "rest",
                });
            }
        }
        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[SetSpec] {
        &self.sets
    }

    /// Nominal session length: every set plus one set rest between each pair.
    pub fn total_secs(&self, set_rest_secs: u32) -> u64 {
        let sets: u64 = self.sets.iter().map(SetSpec::duration_secs).sum();
        let gaps = self.sets.len().saturating_sub(1) as u64;
        sets + gaps * u64::from(set_rest_secs)
    }
}

impl Default for ExercisePlan {
    fn default() -> Self {
        Self {
            sets: vec![
                SetSpec::new(1, 12, 5, 1, Intensity::Moderate),
                SetSpec::new(2, 12, 5, 1, Intensity::Moderate),
                SetSpec::new(3, 12, 5, 1, Intensity::Moderate),
                SetSpec::new(4, 10, 3, 1, Intensity::High),
            ],
        }
    }
}

impl Deref for ExercisePlan {
    type Target = [SetSpec];

    fn deref(&self) -> &Self::Target {
        &self.sets
    }
}

impl TryFrom<Vec<SetSpec>> for ExercisePlan {
    type Error = PlanError;

    fn try_from(sets: Vec<SetSpec>) -> Result<Self, Self::Error> {
        Self::new(sets)
    }
}

impl From<ExercisePlan> for Vec<SetSpec> {
    fn from(plan: ExercisePlan) -> Self {
        plan.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_plan_is_valid() {
        let plan = ExercisePlan::default();
        assert_eq!(ExercisePlan::new(plan.sets().to_vec()), Ok(plan.clone()));
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[3].intensity, Intensity::High);
    }

    #[test]
    fn empty_plan_is_rejected() {
        assert_eq!(ExercisePlan::new(vec![]), Err(PlanError::Empty));
    }

    #[test]
    fn ids_must_start_at_one_and_be_contiguous() {
        let gap = vec![
            SetSpec::new(1, 1, 1, 1, Intensity::Low),
            SetSpec::new(3, 1, 1, 1, Intensity::Low),
        ];
        assert_matches!(
            ExercisePlan::new(gap),
            Err(PlanError::NonContiguousId {
                position: 1,
                expected: 2,
                found: 3
            })
        );

        let late_start = vec![SetSpec::new(2, 1, 1, 1, Intensity::Low)];
        assert_matches!(
            ExercisePlan::new(late_start),
            Err(PlanError::NonContiguousId { position: 0, .. })
        );
    }

    #[test]
    fn zero_reps_and_durations_are_rejected() {
        assert_eq!(
            ExercisePlan::new(vec![SetSpec::new(1, 0, 5, 1, Intensity::Low)]),
            Err(PlanError::ZeroReps { set_id: 1 })
        );
        assert_matches!(
            ExercisePlan::new(vec![SetSpec::new(1, 3, 0, 1, Intensity::Low)]),
            Err(PlanError::ZeroDuration { field: "contraction", .. })
        );
        assert_matches!(
            ExercisePlan::new(vec![SetSpec::new(1, 3, 5, 0, Intensity::Low)]),
            Err(PlanError::ZeroDuration { field: "rest", .. })
        );
    }

    #[test]
    fn total_secs_counts_set_rests_between_sets_only() {
        let plan = ExercisePlan::new(vec![
            SetSpec::new(1, 2, 3, 1, Intensity::Low),
            SetSpec::new(2, 1, 5, 2, Intensity::High),
        ])
        .unwrap();
        // 2 * (3 + 1) + 1 * (5 + 2) + one 30s set rest
        assert_eq!(plan.total_secs(30), 8 + 7 + 30);
    }

    #[test]
    fn deserialization_validates() {
        let json = r#"[{"set_id":1,"reps":2,"contract_secs":3,"rest_secs":1,"intensity":"moderate"}]"#;
        let plan: ExercisePlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan[0].intensity, Intensity::Moderate);

        assert!(serde_json::from_str::<ExercisePlan>("[]").is_err());
    }

    #[test]
    fn intensity_displays_capitalized() {
        assert_eq!(Intensity::Moderate.to_string(), "Moderate");
    }
}
