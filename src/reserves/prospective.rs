//! Prospective net premium reserve
//!
//! The reserve at a valuation date treats the surviving policies as a fresh
//! population of one and projects it forward to the end of the term:
//!
//! ```text
//! p_1 = 1,  p_{k+1} = p_k * (1 - q_k)
//! PV(claims)   = sum_k  SA * p_k * q_k * DF(k)
//! PV(premiums) = sum_k  P  * p_k * DF(k)      (while premiums are payable)
//! reserve      = PV(claims) - PV(premiums)
//! ```
//!
//! Everything here is a pure function of its inputs, so valuations at
//! different months (or for different cohorts) are independent.

use super::discount::DiscountCurve;
use super::types::{ReserveComponents, ValuationPoint};
use crate::assumptions::MortalityBasis;
use crate::error::ProjectionError;
use crate::policy::PolicyCohort;
use log::trace;

/// PV of future claims and premiums per policy in force at the valuation point
pub fn prospective_reserve(
    basis: &MortalityBasis,
    point: &ValuationPoint,
    discount: &DiscountCurve,
) -> Result<ReserveComponents, ProjectionError> {
    let mut components = ReserveComponents::default();
    let mut survival = 1.0;

    for k in 1..=point.remaining_months {
        let q = basis.monthly_rate(point.age_in_future_month(k))?;
        let v = discount.factor(k);

        components.pv_claims += point.sum_assured * survival * q * v;
        if point.premium_due_in_future_month(k) {
            components.pv_premiums += point.monthly_premium * survival * v;
        }

        survival *= 1.0 - q;
    }

    Ok(components)
}

/// Reserve calculator bound to one cohort
///
/// Holds the cohort's discount factors for the whole term so each monthly
/// valuation in a run reuses them.
#[derive(Debug, Clone)]
pub struct ReserveCalculator<'a> {
    cohort: &'a PolicyCohort,
    discount: DiscountCurve,
    floor_negative_reserves: bool,
}

impl<'a> ReserveCalculator<'a> {
    pub fn new(cohort: &'a PolicyCohort) -> Self {
        Self {
            cohort,
            discount: DiscountCurve::new(cohort.annual_interest_rate(), cohort.term_months()),
            floor_negative_reserves: false,
        }
    }

    /// Report negative reserves as zero
    pub fn with_zero_floor(mut self, floor_negative_reserves: bool) -> Self {
        self.floor_negative_reserves = floor_negative_reserves;
        self
    }

    /// Valuation point after `valuation_month` months have elapsed
    pub fn valuation_point(&self, valuation_month: u32) -> ValuationPoint {
        ValuationPoint {
            issue_age: self.cohort.issue_age(),
            valuation_month,
            remaining_months: self.cohort.term_months().saturating_sub(valuation_month),
            sum_assured: self.cohort.sum_assured(),
            monthly_premium: self.cohort.monthly_premium(),
            premium_term_months: self.cohort.premium_term_months(),
        }
    }

    /// PV components per policy after `valuation_month` months
    pub fn components(&self, valuation_month: u32) -> Result<ReserveComponents, ProjectionError> {
        let point = self.valuation_point(valuation_month);
        prospective_reserve(self.cohort.basis(), &point, &self.discount)
    }

    /// Reserve per policy in force after `valuation_month` months
    ///
    /// Zero at or beyond the end of the term and when nothing is in force.
    pub fn reserve_per_policy(
        &self,
        valuation_month: u32,
        in_force: f64,
    ) -> Result<f64, ProjectionError> {
        if in_force <= 0.0 || valuation_month >= self.cohort.term_months() {
            return Ok(0.0);
        }

        let reserve = self.components(valuation_month)?.net_reserve();
        if self.floor_negative_reserves && reserve < 0.0 {
            trace!(
                "Flooring negative reserve {:.6} at month {}",
                reserve,
                valuation_month
            );
            return Ok(0.0);
        }

        Ok(reserve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Assumptions, MortalityRegistry};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::sync::Arc;

    fn flat_basis(qx: f64) -> Arc<MortalityBasis> {
        Arc::new(MortalityBasis::new("flat", 20, vec![qx; 80]).unwrap())
    }

    fn cohort_on(basis: Arc<MortalityBasis>, assumptions: Assumptions) -> PolicyCohort {
        PolicyCohort::with_basis(&assumptions, basis).unwrap()
    }

    #[test]
    fn test_one_month_remaining_by_hand() {
        let basis = flat_basis(0.002);
        let cohort = cohort_on(basis, Assumptions::new(1000, 100_000.0, 12, 40, 0.03, 50.0));
        let calc = ReserveCalculator::new(&cohort);

        let q = 1.0 - 0.998_f64.powf(1.0 / 12.0);
        let v = 1.03_f64.powf(-1.0 / 12.0);

        let c = calc.components(11).unwrap();
        assert_relative_eq!(c.pv_claims, 100_000.0 * q * v, max_relative = 1e-12);
        assert_relative_eq!(c.pv_premiums, 50.0 * v, max_relative = 1e-12);
    }

    #[test]
    fn test_two_months_remaining_by_hand() {
        let basis = flat_basis(0.002);
        let cohort = cohort_on(basis, Assumptions::new(1, 1000.0, 12, 40, 0.05, 1.0));
        let calc = ReserveCalculator::new(&cohort);

        let q = 1.0 - 0.998_f64.powf(1.0 / 12.0);
        let v1 = 1.05_f64.powf(-1.0 / 12.0);
        let v2 = 1.05_f64.powf(-2.0 / 12.0);

        let expected_claims = 1000.0 * q * v1 + 1000.0 * (1.0 - q) * q * v2;
        let expected_premiums = v1 + (1.0 - q) * v2;

        let c = calc.components(10).unwrap();
        assert_relative_eq!(c.pv_claims, expected_claims, max_relative = 1e-12);
        assert_relative_eq!(c.pv_premiums, expected_premiums, max_relative = 1e-12);
        assert_relative_eq!(
            calc.reserve_per_policy(10, 5.0).unwrap(),
            expected_claims - expected_premiums,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_at_term_end_and_with_no_survivors() {
        let cohort = PolicyCohort::new(
            &Assumptions::new(1000, 100_000.0, 24, 60, 0.03, 0.0),
            &MortalityRegistry::with_builtin(),
        )
        .unwrap();
        let calc = ReserveCalculator::new(&cohort);

        assert_eq!(calc.reserve_per_policy(24, 900.0).unwrap(), 0.0);
        assert_eq!(calc.reserve_per_policy(30, 900.0).unwrap(), 0.0);
        assert_eq!(calc.reserve_per_policy(5, 0.0).unwrap(), 0.0);
        assert!(calc.reserve_per_policy(5, 900.0).unwrap() > 0.0);
    }

    #[test]
    fn test_single_premium_cover_runs_down() {
        // No premiums: reserve is the PV of remaining claims and shrinks with time
        let cohort = cohort_on(flat_basis(0.01), Assumptions::new(1, 10_000.0, 60, 30, 0.03, 0.0));
        let calc = ReserveCalculator::new(&cohort);

        let mut previous = f64::MAX;
        for month in 1..60 {
            let r = calc.reserve_per_policy(month, 1.0).unwrap();
            assert!(r > 0.0 && r < previous, "month {}: {}", month, r);
            previous = r;
        }
    }

    #[test]
    fn test_premium_term_limits_future_premiums() {
        let basis = flat_basis(0.005);
        let level = cohort_on(basis.clone(), Assumptions::new(1, 50_000.0, 36, 40, 0.03, 30.0));
        let limited = cohort_on(
            basis,
            Assumptions::new(1, 50_000.0, 36, 40, 0.03, 30.0).with_premium_term(24),
        );

        let level_calc = ReserveCalculator::new(&level);
        let limited_calc = ReserveCalculator::new(&limited);

        assert!(limited_calc.components(12).unwrap().pv_premiums < level_calc.components(12).unwrap().pv_premiums);
        assert_eq!(limited_calc.components(24).unwrap().pv_premiums, 0.0);
        assert_eq!(
            limited_calc.components(12).unwrap().pv_claims,
            level_calc.components(12).unwrap().pv_claims
        );
    }

    #[test]
    fn test_zero_floor() {
        // Premium far above the cost of cover gives a negative reserve
        let cohort = cohort_on(flat_basis(0.001), Assumptions::new(1, 1_000.0, 24, 40, 0.03, 100.0));

        let raw = ReserveCalculator::new(&cohort);
        assert!(raw.reserve_per_policy(1, 1.0).unwrap() < 0.0);

        let floored = ReserveCalculator::new(&cohort).with_zero_floor(true);
        assert_eq!(floored.reserve_per_policy(1, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_interest_is_undiscounted() {
        let cohort = cohort_on(flat_basis(0.0), Assumptions::new(1, 1_000.0, 12, 40, 0.0, 10.0));
        let calc = ReserveCalculator::new(&cohort);
        let c = calc.components(0).unwrap();
        assert_eq!(c.pv_claims, 0.0);
        assert_abs_diff_eq!(c.pv_premiums, 120.0, epsilon = 1e-12);
    }

    #[test]
    fn test_free_function_matches_calculator() {
        let basis = flat_basis(0.003);
        let cohort = cohort_on(basis.clone(), Assumptions::new(1, 75_000.0, 48, 45, 0.04, 25.0));
        let calc = ReserveCalculator::new(&cohort);

        let point = calc.valuation_point(13);
        assert_eq!(point.remaining_months, 35);
        let direct = prospective_reserve(&basis, &point, &DiscountCurve::single_rate(0.04)).unwrap();
        assert_eq!(direct, calc.components(13).unwrap());
    }
}
