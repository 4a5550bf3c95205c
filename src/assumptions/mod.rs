//! Structured projection assumptions and the mortality tables they reference

mod mortality;
mod registry;
pub mod loader;

pub use mortality::{annual_to_monthly, MortalityBasis, ELT17_MALES};
pub use registry::MortalityRegistry;

use serde::{Deserialize, Serialize};

fn default_basis_id() -> String {
    ELT17_MALES.to_string()
}

/// Already-structured assumptions for one block of term policies
///
/// This is the record an upstream provider (a form, a file, a parser) hands
/// to the engine. Nothing here is trusted: `PolicyCohort::new` validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Number of policies in force at the start
    pub policy_count: u64,

    /// Sum assured per policy
    pub sum_assured: f64,

    /// Policy term in months
    pub term_months: u32,

    /// Age at entry in complete years
    pub issue_age: u32,

    /// Mortality table to use
    #[serde(default = "default_basis_id")]
    pub mortality_basis_id: String,

    /// Annual interest rate as a decimal (0.03 for 3%)
    pub annual_interest_rate: f64,

    /// Monthly premium per policy
    pub monthly_premium: f64,

    /// Months for which premiums are payable; the full term when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_term_months: Option<u32>,
}

impl Assumptions {
    /// Level-premium assumptions on the default basis
    pub fn new(
        policy_count: u64,
        sum_assured: f64,
        term_months: u32,
        issue_age: u32,
        annual_interest_rate: f64,
        monthly_premium: f64,
    ) -> Self {
        Self {
            policy_count,
            sum_assured,
            term_months,
            issue_age,
            mortality_basis_id: default_basis_id(),
            annual_interest_rate,
            monthly_premium,
            premium_term_months: None,
        }
    }

    pub fn with_basis(mut self, basis_id: impl Into<String>) -> Self {
        self.mortality_basis_id = basis_id.into();
        self
    }

    pub fn with_premium_term(mut self, premium_term_months: u32) -> Self {
        self.premium_term_months = Some(premium_term_months);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "policy_count": 1000,
            "sum_assured": 100000.0,
            "term_months": 120,
            "issue_age": 40,
            "annual_interest_rate": 0.03,
            "monthly_premium": 50.0
        }"#;
        let parsed: Assumptions = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, Assumptions::new(1000, 100_000.0, 120, 40, 0.03, 50.0));
        assert_eq!(parsed.mortality_basis_id, ELT17_MALES);
        assert!(parsed.premium_term_months.is_none());
    }

    #[test]
    fn test_builders() {
        let a = Assumptions::new(10, 1.0, 24, 30, 0.0, 0.0)
            .with_basis("custom")
            .with_premium_term(12);
        assert_eq!(a.mortality_basis_id, "custom");
        assert_eq!(a.premium_term_months, Some(12));
    }
}
