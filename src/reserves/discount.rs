//! Monthly discount factors for reserve calculations
//!
//! Factors compound monthly from the annual rate, DF(k) = (1 + i)^(-k/12),
//! which is consistent with the compound monthly mortality conversion.

use serde::{Deserialize, Serialize};

/// Discount curve at a single annual valuation rate
///
/// Factors up to `horizon_months` are computed once so that repeated
/// reserve valuations within a run do not recompute powers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCurve {
    /// Annual effective valuation rate
    annual_rate: f64,

    /// factors[k] = (1 + annual_rate)^(-k/12)
    factors: Vec<f64>,
}

impl DiscountCurve {
    /// Curve with factors memoized for months 0..=horizon_months
    pub fn new(annual_rate: f64, horizon_months: u32) -> Self {
        let factors = (0..=horizon_months)
            .map(|k| Self::compute_factor(annual_rate, k))
            .collect();
        Self {
            annual_rate,
            factors,
        }
    }

    /// Curve with no memoized factors
    pub fn single_rate(annual_rate: f64) -> Self {
        Self::new(annual_rate, 0)
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// Equivalent monthly effective rate
    pub fn monthly_rate(&self) -> f64 {
        (1.0 + self.annual_rate).powf(1.0 / 12.0) - 1.0
    }

    /// Discount factor for `months` months
    pub fn factor(&self, months: u32) -> f64 {
        match self.factors.get(months as usize) {
            Some(v) => *v,
            None => Self::compute_factor(self.annual_rate, months),
        }
    }

    /// Months covered by the memoized table
    pub fn horizon_months(&self) -> u32 {
        self.factors.len().saturating_sub(1) as u32
    }

    fn compute_factor(annual_rate: f64, months: u32) -> f64 {
        (1.0 + annual_rate).powf(-(months as f64) / 12.0)
    }
}
