//! Batch runner for projecting many cohorts against one set of tables
//!
//! Mortality tables are loaded once and shared; each cohort is projected
//! independently, so a block of cohorts runs in parallel on the rayon pool
//! with results identical to running them one at a time.

use crate::assumptions::{Assumptions, MortalityRegistry};
use crate::error::{DataError, ProjectionError};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pre-loaded scenario runner for efficient batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_dir("data/mortality")?;
/// let results = runner.run_batch(&cohorts);
/// let block = aggregate_by_month(&results.into_iter().collect::<Result<Vec<_>, _>>()?);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    registry: MortalityRegistry,
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the built-in tables and default config
    pub fn new() -> Self {
        Self::with_registry(MortalityRegistry::with_builtin(), ProjectionConfig::default())
    }

    /// Create runner with built-in tables plus those in a directory
    pub fn from_dir<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        Ok(Self::with_registry(
            MortalityRegistry::with_dir(path)?,
            ProjectionConfig::default(),
        ))
    }

    pub fn with_registry(registry: MortalityRegistry, config: ProjectionConfig) -> Self {
        Self {
            registry,
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, assumptions: &Assumptions) -> Result<ProjectionResult, ProjectionError> {
        self.engine.project_assumptions(assumptions, &self.registry)
    }

    /// Run every cohort in parallel; results keep the input order
    pub fn run_batch(
        &self,
        cohorts: &[Assumptions],
    ) -> Vec<Result<ProjectionResult, ProjectionError>> {
        info!("Running batch of {} cohorts", cohorts.len());
        cohorts.par_iter().map(|a| self.run(a)).collect()
    }

    pub fn registry(&self) -> &MortalityRegistry {
        &self.registry
    }

    /// Mutable registry, e.g. to install a revised table between batches
    pub fn registry_mut(&mut self) -> &mut MortalityRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Block totals for one projection month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMonth {
    pub month: u32,
    pub cohorts_in_force: usize,
    pub policies_start: f64,
    pub deaths: f64,
    pub premium_income: f64,
    pub claim_outgo: f64,
    pub net_cashflow: f64,
    pub reserve: f64,
}

/// Sum results month by month; cohorts that have matured contribute nothing
pub fn aggregate_by_month(results: &[ProjectionResult]) -> Vec<AggregatedMonth> {
    let months = results.iter().map(ProjectionResult::len).max().unwrap_or(0);
    let mut aggregated: Vec<AggregatedMonth> = (0..months)
        .map(|m| AggregatedMonth {
            month: m as u32,
            ..Default::default()
        })
        .collect();

    for result in results {
        for (agg, row) in aggregated.iter_mut().zip(result.records()) {
            agg.cohorts_in_force += 1;
            agg.policies_start += row.policies_start;
            agg.deaths += row.deaths;
            agg.premium_income += row.premium_income;
            agg.claim_outgo += row.claim_outgo;
            agg.net_cashflow += row.net_cashflow;
            agg.reserve += row.reserve;
        }
    }

    aggregated
}
