//! Investment Projection CLI
//!
//! Simulates one or more investment accounts and prints the final year of
//! each ledger, an optional column comparison, and optional CSV exports.

use anyhow::{Context, Result};
use clap::Parser;
use invest_projection::{
    account::{default_accounts, load_accounts, DEFAULT_BROKERAGE_COST},
    export::{save_to_csv, unique_file_stems},
    projection::{Column, SimulationConfig, DEFAULT_START_YEAR, DEFAULT_YEARS},
    Comparison, ScenarioRunner,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "invest_projection", version, about = "Project investment accounts month by month")]
struct Args {
    /// CSV file of accounts (defaults to the Assurance Vie and PEA presets)
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Number of years to simulate
    #[arg(long, default_value_t = DEFAULT_YEARS)]
    years: u32,

    /// Calendar year of the first simulated month
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,

    /// Brokerage cost netted from the PEA preset contribution
    #[arg(long, default_value_t = DEFAULT_BROKERAGE_COST)]
    brokerage_cost: f64,

    /// Column to compare across accounts
    #[arg(long, default_value = "Total balance")]
    column: String,

    /// Directory for <account>_simulation.csv and <account>_parameters.csv
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print every ledger as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let accounts = match &args.accounts {
        Some(path) => load_accounts(path)
            .with_context(|| format!("Failed to load accounts from {}", path.display()))?,
        None => default_accounts(args.brokerage_cost),
    };
    log::info!("Loaded {} accounts", accounts.len());

    let runner = ScenarioRunner::with_config(args.years, SimulationConfig { start_year: args.start_year });
    let engines = runner
        .run_batch(&accounts)
        .context("Simulation failed")?;

    if args.json {
        let ledgers: Vec<_> = engines
            .iter()
            .map(|e| serde_json::json!({ "account": e.account(), "ledger": e.ledger() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&ledgers)?);
    } else {
        for engine in &engines {
            println!("{}", engine.account().name());
            println!("{}", "=".repeat(engine.account().name().len()));
            for record in engine.ledger().last_year() {
                println!("{:<16} {:>16.2}", record.label, record.total_balance);
            }

            let summary = engine.ledger().summary();
            println!("  Total invested: {:.2}", summary.total_invested);
            println!("  Profit:         {:.2}", summary.profit);
            println!("  Fees paid:      {:.2}", summary.total_fees);
            println!("  Dividends:      {:.2}", summary.total_dividends);
            println!();
        }

        if Column::from_name(&args.column).is_none() {
            log::warn!("Unknown column '{}'", args.column);
        } else {
            print_comparison(&Comparison::from_engines(&engines, &args.column));
        }
    }

    if let Some(dir) = &args.output_dir {
        let stems = unique_file_stems(engines.iter().map(|e| e.account().name()));
        for (engine, stem) in engines.iter().zip(&stems) {
            let (ledger_path, _) = save_to_csv(engine, dir, stem)
                .with_context(|| format!("Failed to export {}", engine.account().name()))?;
            println!("Results written to: {}", ledger_path.display());
        }
    }

    Ok(())
}

/// One row per simulated year: the year-end value of every account
fn print_comparison(comparison: &Comparison) {
    println!("{} by year", comparison.column);

    print!("{:>6}", "Year");
    for series in &comparison.series {
        print!(" {:>16}", series.account);
    }
    println!();

    for index in (11..comparison.len()).step_by(12) {
        if let Some(snapshot) = comparison.snapshot(index) {
            print!("{:>6}", snapshot.year.map(|y| y.to_string()).unwrap_or_default());
            for (_, value) in &snapshot.values {
                print!(" {:>16.2}", value);
            }
            println!();
        }
    }
}
