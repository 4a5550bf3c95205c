//! Projection engine for term life cohort run-off

mod state;
mod engine;
mod cashflows;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig};
pub use cashflows::{MonthlyRecord, ProjectionResult, ProjectionSummary};
