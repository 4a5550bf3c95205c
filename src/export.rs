//! CSV export of projection results
//!
//! Values are written exactly as computed; any rounding is left to whoever
//! reads the file.

use crate::error::DataError;
use crate::projection::ProjectionResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write one CSV row per month, with a header, to any writer
pub fn write_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<(), DataError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in result.records() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the CSV to a file, replacing it if present
pub fn write_csv_file<P: AsRef<Path>>(result: &ProjectionResult, path: P) -> Result<(), DataError> {
    let file = File::create(path)?;
    write_csv(result, file)
}

/// Render the CSV into a string
pub fn to_csv_string(result: &ProjectionResult) -> Result<String, DataError> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| DataError::Parse {
        line: 0,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Assumptions, MortalityRegistry};
    use crate::projection::{MonthlyRecord, ProjectionEngine};

    fn result() -> ProjectionResult {
        ProjectionEngine::default()
            .project_assumptions(
                &Assumptions::new(1000, 100_000.0, 24, 40, 0.03, 50.0),
                &MortalityRegistry::with_builtin(),
            )
            .unwrap()
    }

    #[test]
    fn test_header_and_row_count() {
        let csv = to_csv_string(&result()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "month,policy_year,attained_age,policies_start,deaths,policies_end,\
             premium_income,claim_outgo,net_cashflow,reserve_per_policy,reserve"
        );
        assert_eq!(lines.count(), 24);
    }

    #[test]
    fn test_values_survive_export_unchanged() {
        let result = result();
        let csv = to_csv_string(&result).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let parsed: Vec<MonthlyRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed.as_slice(), result.records());
    }
}
