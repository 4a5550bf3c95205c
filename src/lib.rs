//! Term Projection - monthly run-off engine for blocks of term life policies
//!
//! This library provides:
//! - Mortality bases with compound annual-to-monthly decrement conversion
//! - Validated policy cohorts built from structured assumptions
//! - Month-by-month projection of survivors, deaths, premiums and claims
//! - Prospective net premium reserves at the end of every month
//! - CSV export, a JSON-lines run store and parallel batch runs

pub mod error;
pub mod assumptions;
pub mod policy;
pub mod reserves;
pub mod projection;
pub mod scenario;
pub mod export;
pub mod store;

// Re-export commonly used types
pub use error::{DataError, ProjectionError};
pub use assumptions::{Assumptions, MortalityBasis, MortalityRegistry};
pub use policy::PolicyCohort;
pub use reserves::ReserveCalculator;
pub use projection::{ProjectionEngine, ProjectionConfig, ProjectionResult, MonthlyRecord};
pub use scenario::ScenarioRunner;
