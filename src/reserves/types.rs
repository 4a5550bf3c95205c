//! Core types for reserve calculations

use serde::{Deserialize, Serialize};

/// Everything a prospective valuation needs to know about the contract
///
/// Durations are in projection months from issue. A valuation at
/// `valuation_month = v` sits at the end of month `v - 1`; its first future
/// month is projection month `v`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    pub issue_age: u32,

    /// Months elapsed since issue
    pub valuation_month: u32,

    /// Months left in the term after the valuation date
    pub remaining_months: u32,

    pub sum_assured: f64,
    pub monthly_premium: f64,

    /// Premiums are payable in projection months below this
    pub premium_term_months: u32,
}

impl ValuationPoint {
    /// Projection month of the k-th future month
    ///
    /// Future months count from 1; `k = 0` is treated as `k = 1`. Saturates
    /// at `u32::MAX` for hand-built points far beyond any term.
    pub fn projection_month(&self, k: u32) -> u32 {
        self.valuation_month.saturating_add(k.saturating_sub(1))
    }

    /// Attained age during the k-th future month (k >= 1)
    pub fn age_in_future_month(&self, k: u32) -> u32 {
        self.issue_age.saturating_add(self.projection_month(k) / 12)
    }

    /// Whether a premium falls due in the k-th future month (k >= 1)
    pub fn premium_due_in_future_month(&self, k: u32) -> bool {
        self.projection_month(k) < self.premium_term_months
    }
}

/// Present values making up a reserve, per policy in force
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReserveComponents {
    /// PV of expected future death claims
    pub pv_claims: f64,

    /// PV of expected future premiums
    pub pv_premiums: f64,
}

impl ReserveComponents {
    /// Net premium reserve: PV(claims) - PV(premiums)
    pub fn net_reserve(&self) -> f64 {
        self.pv_claims - self.pv_premiums
    }
}
