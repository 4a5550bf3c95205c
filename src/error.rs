//! Error types for projection and data handling
//!
//! `ProjectionError` covers everything the core engine can reject. All of it
//! is raised before the first month is projected, so callers never see a
//! partial result. `DataError` wraps the I/O side (CSV tables, export, run
//! store) around it.

use thiserror::Error;

/// Errors raised by the mortality basis, cohort validation and the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Age lookup outside the table range.
    #[error("age {age} is outside mortality basis '{basis_id}' range [{min_age}, {max_age}]")]
    OutOfRange {
        basis_id: String,
        age: u32,
        min_age: u32,
        max_age: u32,
    },

    /// Structurally invalid cohort parameters.
    #[error("invalid assumption '{field}': {reason}")]
    InvalidAssumptions {
        field: &'static str,
        reason: String,
    },

    /// Mortality table that cannot be used as a basis.
    #[error("invalid mortality basis '{basis_id}': {reason}")]
    InvalidBasis {
        basis_id: String,
        reason: String,
    },
}

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAssumptions {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors from loading tables, exporting results and persisting runs
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed record at a given (1-indexed) line.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
