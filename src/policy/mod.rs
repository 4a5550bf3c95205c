//! Policy cohorts and block loading

mod cohort;
pub mod loader;

pub use cohort::PolicyCohort;
pub use loader::{load_cohorts, load_cohorts_from_reader};
