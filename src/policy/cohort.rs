//! Validated, immutable description of a block of term policies

use crate::assumptions::{Assumptions, MortalityBasis, MortalityRegistry};
use crate::error::ProjectionError;
use std::sync::Arc;

/// A homogeneous block of term life policies ready to be projected
///
/// Construction validates every assumption, including that each attained age
/// the projection will look up exists in the mortality basis. Once built, a
/// cohort cannot fail a projection.
#[derive(Debug, Clone)]
pub struct PolicyCohort {
    policy_count: u64,
    issue_age: u32,
    term_months: u32,
    premium_term_months: u32,
    sum_assured: f64,
    monthly_premium: f64,
    annual_interest_rate: f64,
    basis: Arc<MortalityBasis>,
}

impl PolicyCohort {
    /// Validate assumptions, resolving the basis id through the registry
    pub fn new(
        assumptions: &Assumptions,
        registry: &MortalityRegistry,
    ) -> Result<Self, ProjectionError> {
        let basis = registry.get(&assumptions.mortality_basis_id)?;
        Self::with_basis(assumptions, basis)
    }

    /// Validate assumptions against an explicit basis
    ///
    /// `assumptions.mortality_basis_id` is not consulted.
    pub fn with_basis(
        assumptions: &Assumptions,
        basis: Arc<MortalityBasis>,
    ) -> Result<Self, ProjectionError> {
        if assumptions.term_months == 0 {
            return Err(ProjectionError::invalid("term_months", "must be positive"));
        }
        if !(assumptions.sum_assured.is_finite() && assumptions.sum_assured > 0.0) {
            return Err(ProjectionError::invalid(
                "sum_assured",
                format!("must be positive, got {}", assumptions.sum_assured),
            ));
        }
        if !(assumptions.monthly_premium.is_finite() && assumptions.monthly_premium >= 0.0) {
            return Err(ProjectionError::invalid(
                "monthly_premium",
                format!("must be non-negative, got {}", assumptions.monthly_premium),
            ));
        }
        if !(assumptions.annual_interest_rate.is_finite() && assumptions.annual_interest_rate > -1.0)
        {
            return Err(ProjectionError::invalid(
                "annual_interest_rate",
                format!("must be greater than -1, got {}", assumptions.annual_interest_rate),
            ));
        }

        let premium_term_months = assumptions
            .premium_term_months
            .unwrap_or(assumptions.term_months);
        if premium_term_months > assumptions.term_months {
            return Err(ProjectionError::invalid(
                "premium_term_months",
                format!(
                    "{} exceeds the policy term of {} months",
                    premium_term_months, assumptions.term_months
                ),
            ));
        }

        // Last month projected is term_months - 1
        let final_age = assumptions
            .issue_age
            .saturating_add((assumptions.term_months - 1) / 12);
        if !basis.contains(assumptions.issue_age) || !basis.contains(final_age) {
            return Err(ProjectionError::invalid(
                "issue_age",
                format!(
                    "ages {}-{} over the term fall outside mortality basis '{}' range [{}, {}]",
                    assumptions.issue_age,
                    final_age,
                    basis.id(),
                    basis.min_age(),
                    basis.max_age()
                ),
            ));
        }

        Ok(Self {
            policy_count: assumptions.policy_count,
            issue_age: assumptions.issue_age,
            term_months: assumptions.term_months,
            premium_term_months,
            sum_assured: assumptions.sum_assured,
            monthly_premium: assumptions.monthly_premium,
            annual_interest_rate: assumptions.annual_interest_rate,
            basis,
        })
    }

    pub fn policy_count(&self) -> u64 {
        self.policy_count
    }

    pub fn issue_age(&self) -> u32 {
        self.issue_age
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn premium_term_months(&self) -> u32 {
        self.premium_term_months
    }

    pub fn sum_assured(&self) -> f64 {
        self.sum_assured
    }

    pub fn monthly_premium(&self) -> f64 {
        self.monthly_premium
    }

    pub fn annual_interest_rate(&self) -> f64 {
        self.annual_interest_rate
    }

    pub fn basis(&self) -> &MortalityBasis {
        &self.basis
    }

    /// Integer attained age during a 0-indexed projection month
    pub fn attained_age(&self, month: u32) -> u32 {
        self.issue_age + month / 12
    }

    /// Policy year (1-indexed) of a 0-indexed projection month
    pub fn policy_year(&self, month: u32) -> u32 {
        month / 12 + 1
    }

    /// Whether premiums are collected in a 0-indexed projection month
    pub fn premium_payable(&self, month: u32) -> bool {
        month < self.premium_term_months
    }
}
