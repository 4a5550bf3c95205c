//! Load blocks of cohort assumptions from CSV
//!
//! Columns: `policy_count,sum_assured,term_months,issue_age,mortality_basis_id,
//! annual_interest_rate,monthly_premium,premium_term_months`. The basis id and
//! premium term may be left blank.

use crate::assumptions::{Assumptions, ELT17_MALES};
use crate::error::DataError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row; blanks are allowed in the optional columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    policy_count: u64,
    sum_assured: f64,
    term_months: u32,
    issue_age: u32,
    #[serde(default)]
    mortality_basis_id: Option<String>,
    annual_interest_rate: f64,
    monthly_premium: f64,
    #[serde(default)]
    premium_term_months: Option<u32>,
}

impl CsvRow {
    fn into_assumptions(self) -> Assumptions {
        let basis_id = self
            .mortality_basis_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| ELT17_MALES.to_string());

        Assumptions {
            policy_count: self.policy_count,
            sum_assured: self.sum_assured,
            term_months: self.term_months,
            issue_age: self.issue_age,
            mortality_basis_id: basis_id,
            annual_interest_rate: self.annual_interest_rate,
            monthly_premium: self.monthly_premium,
            premium_term_months: self.premium_term_months,
        }
    }
}

/// Load all cohort assumptions from a CSV file
pub fn load_cohorts<P: AsRef<Path>>(path: P) -> Result<Vec<Assumptions>, DataError> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load cohort assumptions from any reader (e.g., string buffer, network stream)
pub fn load_cohorts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Assumptions>, DataError> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Assumptions>, DataError> {
    let mut cohorts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        cohorts.push(row.into_assumptions());
    }

    Ok(cohorts)
}
