//! Run every scenario in a CSV file and write one summary row per scenario
//!
//! Usage: run_batch <scenarios.csv> [--years N] [--out batch_summary.csv]

use anyhow::{Context, Result};
use clap::Parser;
use financing_calculator::{
    export::write_batch_summary_csv,
    loan::load_scenarios,
    EngineConfig, ScenarioRunner,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_batch", version, about = "Batch amortization and payoff runs")]
struct Cli {
    /// Scenario CSV (scenario_id, purchase_price, equity, interest_rate, initial_amortization, ...)
    scenarios: PathBuf,

    /// Years to summarize per scenario
    #[arg(long, default_value_t = 10)]
    years: u32,

    /// Output CSV path
    #[arg(long, default_value = "batch_summary.csv")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", cli.scenarios.display());
    let scenarios = load_scenarios(&cli.scenarios)
        .with_context(|| format!("Failed to load scenarios from {}", cli.scenarios.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::with_config(EngineConfig::from_env());
    let run_start = Instant::now();
    let outcomes = runner.run_batch(&scenarios, cli.years);
    println!("Scenarios complete in {:?}", run_start.elapsed());

    let file = File::create(&cli.out)
        .with_context(|| format!("Failed to create {}", cli.out.display()))?;
    write_batch_summary_csv(BufWriter::new(file), &outcomes)?;
    println!("Output written to {}", cli.out.display());

    let with_payoff: Vec<_> = outcomes.iter().filter_map(|o| o.payoff.as_ref()).collect();
    let feasible = with_payoff.iter().filter(|p| p.feasible).count();
    let total_interest: f64 = outcomes.iter().map(|o| o.summary.total_interest).sum();

    println!("\nBatch Summary:");
    println!("  Scenarios:               {}", outcomes.len());
    println!("  Total interest ({:>2} yrs): {:.2}", cli.years, total_interest);
    println!("  Payoff queries:          {} ({} feasible)", with_payoff.len(), feasible);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
