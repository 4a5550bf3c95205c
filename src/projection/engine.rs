//! Core projection engine for monthly term life cashflow projections

use super::cashflows::{MonthlyRecord, ProjectionResult};
use super::state::ProjectionState;
use crate::assumptions::{Assumptions, MortalityRegistry};
use crate::error::ProjectionError;
use crate::policy::PolicyCohort;
use crate::reserves::ReserveCalculator;
use log::debug;

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Report negative reserves as zero instead of as a negative liability
    pub floor_negative_reserves: bool,
}

/// Main projection engine
///
/// Stateless between runs: the same cohort always produces the same result,
/// and one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Validate assumptions and run them in one step
    pub fn project_assumptions(
        &self,
        assumptions: &Assumptions,
        registry: &MortalityRegistry,
    ) -> Result<ProjectionResult, ProjectionError> {
        let cohort = PolicyCohort::new(assumptions, registry)?;
        self.project_cohort(&cohort)
    }

    /// Run the month-by-month run-off of a cohort to the end of its term
    ///
    /// Cohort construction has already checked every attained age against
    /// the basis, so the error path here is never taken for a valid cohort.
    pub fn project_cohort(&self, cohort: &PolicyCohort) -> Result<ProjectionResult, ProjectionError> {
        debug!(
            "Projecting {} policies, issue age {}, {} months on {}",
            cohort.policy_count(),
            cohort.issue_age(),
            cohort.term_months(),
            cohort.basis().id()
        );

        let reserves = ReserveCalculator::new(cohort).with_zero_floor(self.config.floor_negative_reserves);
        let mut result = ProjectionResult::with_capacity(cohort.term_months() as usize);
        let mut state = ProjectionState::from_cohort(cohort);

        while state.month < cohort.term_months() {
            let row = self.calculate_month(cohort, &reserves, &state)?;
            state.advance_month(row.deaths);
            result.add_row(row);
        }

        debug!(
            "Projection complete: {} months, {:.4} policies in force at term",
            result.len(),
            state.in_force
        );

        Ok(result)
    }

    /// Calculate cashflows for a single month
    fn calculate_month(
        &self,
        cohort: &PolicyCohort,
        reserves: &ReserveCalculator<'_>,
        state: &ProjectionState,
    ) -> Result<MonthlyRecord, ProjectionError> {
        let month = state.month;
        let attained_age = cohort.attained_age(month);
        let q_monthly = cohort.basis().monthly_rate(attained_age)?;

        let policies_start = state.in_force;
        let deaths = policies_start * q_monthly;
        let policies_end = policies_start - deaths;

        // Premiums come from policies in force before this month's deaths
        let premium_income = if cohort.premium_payable(month) {
            policies_start * cohort.monthly_premium()
        } else {
            0.0
        };
        let claim_outgo = deaths * cohort.sum_assured();

        // Valued at the end of this month, on the survivors
        let reserve_per_policy = reserves.reserve_per_policy(month + 1, policies_end)?;

        Ok(MonthlyRecord {
            month,
            policy_year: cohort.policy_year(month),
            attained_age,
            policies_start,
            deaths,
            policies_end,
            premium_income,
            claim_outgo,
            net_cashflow: premium_income - claim_outgo,
            reserve_per_policy,
            reserve: reserve_per_policy * policies_end,
        })
    }
}
