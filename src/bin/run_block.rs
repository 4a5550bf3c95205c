//! Run projections for a block of cohorts from CSV
//!
//! Outputs monthly cashflows aggregated across every cohort in the block

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use term_projection::{
    assumptions::loader::DEFAULT_MORTALITY_PATH,
    policy::load_cohorts,
    scenario::{aggregate_by_month, ScenarioRunner},
    MortalityRegistry, ProjectionConfig, ProjectionResult,
};

#[derive(Parser, Debug)]
#[command(name = "run_block", about = "Project every cohort in a CSV block and aggregate by month")]
struct Args {
    /// CSV of cohort assumptions
    #[arg(long, default_value = "data/sample_block.csv")]
    input: PathBuf,

    /// Directory of mortality tables
    #[arg(long, default_value = DEFAULT_MORTALITY_PATH)]
    mortality_dir: PathBuf,

    /// Aggregated monthly output
    #[arg(long, default_value = "block_projection_output.csv")]
    output: PathBuf,

    /// Report negative reserves as zero
    #[arg(long)]
    floor_negative_reserves: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading cohorts from {}...", args.input.display());

    let cohorts = load_cohorts(&args.input)
        .with_context(|| format!("Failed to load cohorts from {}", args.input.display()))?;
    println!("Loaded {} cohorts in {:?}", cohorts.len(), start.elapsed());

    let registry = MortalityRegistry::with_dir(&args.mortality_dir)
        .with_context(|| format!("Failed to load mortality tables from {}", args.mortality_dir.display()))?;
    let runner = ScenarioRunner::with_registry(
        registry,
        ProjectionConfig {
            floor_negative_reserves: args.floor_negative_reserves,
        },
    );

    println!("Running projections...");
    let proj_start = Instant::now();

    // Any invalid cohort fails the whole block
    let mut results: Vec<ProjectionResult> = Vec::with_capacity(cohorts.len());
    for (index, outcome) in runner.run_batch(&cohorts).into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => bail!("Cohort {} (row {}) rejected: {}", index, index + 2, e),
        }
    }

    println!("Projections complete in {:?}", proj_start.elapsed());

    let aggregated = aggregate_by_month(&results);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in &aggregated {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    println!("\nBlock Summary:");
    for &m in &[0usize, 11, 59, 119, 239] {
        if let Some(row) = aggregated.get(m) {
            println!(
                "  Month {:>3}: Cohorts={} InForce={:.4} Premiums={:.2} Claims={:.2} Reserve={:.2}",
                row.month,
                row.cohorts_in_force,
                row.policies_start,
                row.premium_income,
                row.claim_outgo,
                row.reserve
            );
        }
    }

    let total_premiums: f64 = aggregated.iter().map(|r| r.premium_income).sum();
    let total_claims: f64 = aggregated.iter().map(|r| r.claim_outgo).sum();
    println!("  Total premiums: {:.2}", total_premiums);
    println!("  Total claims:   {:.2}", total_claims);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
