//! Cashflow output structures for projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    // Timing
    /// Projection month, 0-indexed
    pub month: u32,
    /// Policy year, 1-indexed
    pub policy_year: u32,
    pub attained_age: u32,

    // Decrements
    /// Expected policies in force at the start of the month
    pub policies_start: f64,
    pub deaths: f64,
    /// Expected policies in force at the end of the month
    pub policies_end: f64,

    // Cashflows
    pub premium_income: f64,
    pub claim_outgo: f64,
    pub net_cashflow: f64,

    // Reserve at end of month
    pub reserve_per_policy: f64,
    /// Total reserve held for the surviving policies
    pub reserve: f64,
}

/// Complete, immutable output of one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    records: Vec<MonthlyRecord>,
}

impl ProjectionResult {
    pub(crate) fn with_capacity(months: usize) -> Self {
        Self {
            records: Vec::with_capacity(months),
        }
    }

    pub(crate) fn add_row(&mut self, row: MonthlyRecord) {
        self.records.push(row);
    }

    /// Monthly records in chronological order
    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let initial = ProjectionSummary {
            total_months: self.records.len() as u32,
            ..ProjectionSummary::default()
        };

        let mut summary = self.records.iter().fold(initial, |mut acc, r| {
            acc.total_premiums += r.premium_income;
            acc.total_claims += r.claim_outgo;
            acc.total_deaths += r.deaths;
            acc.total_net_cashflow += r.net_cashflow;
            acc.peak_reserve = acc.peak_reserve.max(r.reserve);
            acc
        });

        summary.final_in_force = self.records.last().map(|r| r.policies_end).unwrap_or(0.0);
        summary
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_premiums: f64,
    pub total_claims: f64,
    pub total_deaths: f64,
    pub total_net_cashflow: f64,
    pub final_in_force: f64,
    pub peak_reserve: f64,
}
