//! Term Projection CLI
//!
//! Command-line interface for projecting a single block of term policies

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;
use term_projection::{
    assumptions::ELT17_MALES,
    export::write_csv_file,
    store::RunStore,
    Assumptions, MortalityRegistry, ProjectionConfig, ProjectionEngine,
};

#[derive(Parser, Debug)]
#[command(name = "term_projection", version, about = "Project a block of term life policies month by month")]
struct Cli {
    /// JSON file of structured assumptions; overrides the individual flags
    #[arg(long)]
    assumptions: Option<PathBuf>,

    #[arg(long, default_value_t = 1000)]
    policies: u64,

    #[arg(long, default_value_t = 100_000.0)]
    sum_assured: f64,

    #[arg(long, default_value_t = 120)]
    term_months: u32,

    #[arg(long, default_value_t = 40)]
    issue_age: u32,

    /// Mortality basis id
    #[arg(long, default_value = ELT17_MALES)]
    basis: String,

    /// Annual interest rate as a decimal
    #[arg(long, default_value_t = 0.03)]
    interest_rate: f64,

    #[arg(long, default_value_t = 50.0)]
    monthly_premium: f64,

    /// Limited premium term in months (defaults to the full term)
    #[arg(long)]
    premium_term_months: Option<u32>,

    /// Directory of additional `<BASIS_ID>.csv` mortality tables
    #[arg(long)]
    mortality_dir: Option<PathBuf>,

    /// Report negative reserves as zero
    #[arg(long)]
    floor_negative_reserves: bool,

    /// Write the full monthly schedule to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append the run to this JSON-lines run store
    #[arg(long)]
    store: Option<PathBuf>,

    /// Number of months to print to the console
    #[arg(long, default_value_t = 24)]
    rows: usize,
}

impl Cli {
    fn load_assumptions(&self) -> Result<Assumptions> {
        if let Some(path) = &self.assumptions {
            let file = File::open(path)
                .with_context(|| format!("Unable to open assumptions file {}", path.display()))?;
            return serde_json::from_reader(file)
                .with_context(|| format!("Invalid assumptions in {}", path.display()));
        }

        Ok(Assumptions {
            policy_count: self.policies,
            sum_assured: self.sum_assured,
            term_months: self.term_months,
            issue_age: self.issue_age,
            mortality_basis_id: self.basis.clone(),
            annual_interest_rate: self.interest_rate,
            monthly_premium: self.monthly_premium,
            premium_term_months: self.premium_term_months,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let registry = match &cli.mortality_dir {
        Some(dir) => MortalityRegistry::with_dir(dir)
            .with_context(|| format!("Failed to load mortality tables from {}", dir.display()))?,
        None => MortalityRegistry::with_builtin(),
    };

    let assumptions = cli.load_assumptions()?;

    println!("Term Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Policies:        {}", assumptions.policy_count);
    println!("  Sum Assured:   {:.2}", assumptions.sum_assured);
    println!("  Term:          {} months", assumptions.term_months);
    println!("  Issue Age:     {}", assumptions.issue_age);
    println!("  Basis:         {}", assumptions.mortality_basis_id);
    println!("  Interest:      {:.4}", assumptions.annual_interest_rate);
    println!("  Premium:       {:.2} per month", assumptions.monthly_premium);
    println!();

    let engine = ProjectionEngine::new(ProjectionConfig {
        floor_negative_reserves: cli.floor_negative_reserves,
    });
    let start = Instant::now();
    let outcome = engine.project_assumptions(&assumptions, &registry);
    let elapsed = start.elapsed();

    // Rejected runs are logged too
    if let Some(path) = &cli.store {
        let store = RunStore::open(path)
            .with_context(|| format!("Unable to open run store {}", path.display()))?;
        let run_id = match &outcome {
            Ok(result) => store.save(&assumptions, result, elapsed)?,
            Err(e) => store.save_failure(&assumptions, e, elapsed)?,
        };
        println!("Run stored as {}\n", run_id);
    }

    let result = outcome.context("Projection rejected")?;

    println!("{:>5} {:>3} {:>4} {:>14} {:>10} {:>14} {:>14} {:>16}",
        "Month", "PY", "Age", "InForce", "Deaths", "Premiums", "Claims", "Reserve");
    println!("{}", "-".repeat(90));

    for row in result.records().iter().take(cli.rows) {
        println!("{:>5} {:>3} {:>4} {:>14.4} {:>10.4} {:>14.2} {:>14.2} {:>16.2}",
            row.month,
            row.policy_year,
            row.attained_age,
            row.policies_start,
            row.deaths,
            row.premium_income,
            row.claim_outgo,
            row.reserve,
        );
    }

    if result.len() > cli.rows {
        println!("... ({} more months)", result.len() - cli.rows);
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Months:    {}", summary.total_months);
    println!("  Total Premiums:  {:.2}", summary.total_premiums);
    println!("  Total Claims:    {:.2}", summary.total_claims);
    println!("  Net Cashflow:    {:.2}", summary.total_net_cashflow);
    println!("  Total Deaths:    {:.4}", summary.total_deaths);
    println!("  Final In Force:  {:.4}", summary.final_in_force);
    println!("  Peak Reserve:    {:.2}", summary.peak_reserve);
    println!("  Elapsed:         {:?}", elapsed);

    if let Some(path) = &cli.output {
        write_csv_file(&result, path)
            .with_context(|| format!("Unable to write {}", path.display()))?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}
