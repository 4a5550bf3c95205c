//! Projection state carried from one month to the next

use crate::policy::PolicyCohort;

/// Run-off state of a cohort at the start of a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Current projection month (0-indexed)
    pub month: u32,

    /// Expected policies in force (real-valued)
    pub in_force: f64,
}

impl ProjectionState {
    /// Initialize state from a cohort at projection start
    pub fn from_cohort(cohort: &PolicyCohort) -> Self {
        Self {
            month: 0,
            in_force: cohort.policy_count() as f64,
        }
    }

    /// Remove this month's deaths and move to the next month
    pub fn advance_month(&mut self, deaths: f64) {
        self.in_force -= deaths;
        self.month += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Assumptions, MortalityRegistry};

    #[test]
    fn test_advance() {
        let cohort = PolicyCohort::new(
            &Assumptions::new(250, 10_000.0, 12, 30, 0.02, 5.0),
            &MortalityRegistry::with_builtin(),
        )
        .unwrap();

        let mut state = ProjectionState::from_cohort(&cohort);
        assert_eq!(state, ProjectionState { month: 0, in_force: 250.0 });

        state.advance_month(0.5);
        assert_eq!(state, ProjectionState { month: 1, in_force: 249.5 });
    }
}
