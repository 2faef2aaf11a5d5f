//! Financing Calculator CLI
//!
//! Command-line interface for amortization schedules and payoff projections

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use financing_calculator::{
    amortization::{AmortizationEngine, EngineConfig, PayoffResult, ScheduleSummary, YearlyScheduleEntry},
    export::{write_json_export, write_schedule_csv, ExportDocument},
    loan::{load_configuration, LoanConfiguration},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Property financing calculator
#[derive(Parser)]
#[command(
    name = "financing_calculator",
    version,
    about = "Amortization schedules and affordability projections for property loans"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the yearly amortization schedule
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,

        /// Number of years to show
        #[arg(long, default_value_t = 10)]
        years: u32,
    },
    /// Print summary statistics over the first N years
    Summary {
        #[command(flatten)]
        loan: LoanArgs,

        #[arg(long, default_value_t = 10)]
        years: u32,
    },
    /// Years needed to repay the loan at an affordable monthly payment
    Payoff {
        #[command(flatten)]
        loan: LoanArgs,

        /// Affordable monthly payment
        #[arg(long, allow_negative_numbers = true)]
        monthly_payment: f64,

        /// Also print the schedule under the affordable payment
        #[arg(long)]
        schedule: bool,
    },
    /// Write schedule and summary to a file (CSV or JSON)
    Export {
        #[command(flatten)]
        loan: LoanArgs,

        #[arg(long, default_value_t = 10)]
        years: u32,

        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Loan inputs given as flags or as a JSON file
#[derive(Args, Debug)]
struct LoanArgs {
    /// JSON file with the loan configuration; replaces the flags below
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    purchase_price: f64,

    #[arg(long, default_value_t = 0.0)]
    equity: f64,

    /// Annual interest rate in percent
    #[arg(long, default_value_t = 0.0)]
    interest_rate: f64,

    /// Initial amortization rate in percent
    #[arg(long, default_value_t = 0.0)]
    initial_amortization: f64,

    /// Extra principal repayment per year
    #[arg(long, default_value_t = 0.0)]
    special_payment: f64,

    #[arg(long, default_value_t = 10)]
    interest_binding_years: u32,
}

impl LoanArgs {
    fn load(&self) -> Result<LoanConfiguration> {
        if let Some(path) = &self.input {
            return load_configuration(path)
                .with_context(|| format!("Failed to load loan configuration from {}", path.display()));
        }

        let config = LoanConfiguration::new(
            self.purchase_price,
            self.equity,
            self.interest_rate,
            self.initial_amortization,
        )
        .with_special_payment(self.special_payment)
        .with_interest_binding_years(self.interest_binding_years);

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let engine_config = EngineConfig::from_env();

    match cli.command {
        Commands::Schedule { loan, years } => {
            check_years(years)?;
            let mut engine = AmortizationEngine::with_config(loan.load()?, engine_config);
            print_schedule(cli.output, engine.compute_schedule(years))
        }
        Commands::Summary { loan, years } => {
            check_years(years)?;
            let mut engine = AmortizationEngine::with_config(loan.load()?, engine_config);
            print_summary(cli.output, &engine.get_summary(years))
        }
        Commands::Payoff { loan, monthly_payment, schedule } => {
            let mut engine = AmortizationEngine::with_config(loan.load()?, engine_config);
            // A feasible result locks the affordable payment into the engine,
            // so the schedule below is computed with it
            let result = engine.compute_years_to_payoff(monthly_payment);
            print_payoff(cli.output, &result)?;

            if schedule {
                if let Some(years) = result.years.filter(|&y| y > 0 && result.feasible) {
                    print_schedule(cli.output, engine.compute_schedule(years))?;
                }
            }
            Ok(())
        }
        Commands::Export { loan, years, format, out } => {
            check_years(years)?;
            let mut engine = AmortizationEngine::with_config(loan.load()?, engine_config);
            let writer: Box<dyn Write> = match &out {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
                )),
                None => Box::new(io::stdout().lock()),
            };

            match format {
                ExportFormat::Json => {
                    let document = ExportDocument::from_engine(&mut engine, years);
                    write_json_export(writer, &document)?;
                }
                ExportFormat::Csv => {
                    write_schedule_csv(writer, engine.compute_schedule(years))?;
                }
            }

            if let Some(path) = out {
                eprintln!("Export written to: {}", path.display());
            }
            Ok(())
        }
    }
}

fn check_years(years: u32) -> Result<()> {
    if years == 0 {
        bail!("--years must be at least 1");
    }
    Ok(())
}

fn print_schedule(format: OutputFormat, schedule: &[YearlyScheduleEntry]) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(schedule)?),
        OutputFormat::Csv => write_schedule_csv(io::stdout().lock(), schedule)?,
        OutputFormat::Text => {
            println!(
                "{:>4} {:>14} {:>12} {:>12} {:>12} {:>14}",
                "Year", "Debt Start", "Payment", "Interest", "Repayment", "Debt End"
            );
            println!("{}", "-".repeat(73));
            for entry in schedule {
                println!(
                    "{:>4} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                    entry.year,
                    entry.debt_start,
                    entry.annual_payment,
                    entry.interest_payment,
                    entry.amortization,
                    entry.debt_end,
                );
            }
        }
    }
    Ok(())
}

fn print_summary(format: OutputFormat, summary: &ScheduleSummary) -> Result<()> {
    let fields = [
        ("purchase_price", summary.purchase_price),
        ("equity", summary.equity),
        ("loan_amount", summary.loan_amount),
        ("interest_rate", summary.interest_rate),
        ("initial_amortization", summary.initial_amortization),
        ("annual_payment", summary.annual_payment),
        ("monthly_payment", summary.monthly_payment),
        ("total_interest", summary.total_interest),
        ("total_amortization", summary.total_amortization),
        ("total_paid", summary.total_paid()),
        ("remaining_debt", summary.remaining_debt),
    ];

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(io::stdout().lock());
            wtr.write_record(["field", "value"])?;
            wtr.write_record(["years", &summary.years.to_string()])?;
            for (name, value) in fields {
                wtr.write_record([name, &format!("{:.2}", value)])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            println!("Summary over {} years:", summary.years);
            for (name, value) in fields {
                println!("  {:<22} {:>14.2}", name, value);
            }
            println!("  {:<22} {:>13.1}%", "interest_share", summary.interest_share() * 100.0);
            println!("  {:<22} {:>14}", "interest_binding_years", summary.interest_binding_years);
        }
    }
    Ok(())
}

fn print_payoff(format: OutputFormat, result: &PayoffResult) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(io::stdout().lock());
            wtr.write_record(["field", "value"])?;
            wtr.write_record(["feasible", &result.feasible.to_string()])?;
            wtr.write_record(["years", &result.years.map(|y| y.to_string()).unwrap_or_default()])?;
            wtr.write_record([
                "total_interest",
                &result.total_interest.map(|i| format!("{:.2}", i)).unwrap_or_default(),
            ])?;
            wtr.write_record(["remaining_debt", &format!("{:.2}", result.remaining_debt)])?;
            wtr.write_record(["monthly_payment", &format!("{:.2}", result.monthly_payment)])?;
            wtr.write_record(["annual_payment", &format!("{:.2}", result.annual_payment)])?;
            wtr.write_record(["reason", &result.reason().unwrap_or_default()])?;
            wtr.flush()?;
        }
        OutputFormat::Text => {
            println!("Loan amount:     {:>14.2}", result.loan_amount);
            println!("Monthly payment: {:>14.2}", result.monthly_payment);
            println!("Annual payment:  {:>14.2}", result.annual_payment);
            match (result.feasible, result.years, result.total_interest) {
                (true, Some(years), Some(total_interest)) => {
                    println!("Paid off after:  {:>14} years", years);
                    println!("Total interest:  {:>14.2}", total_interest);
                }
                _ => {
                    println!("Not feasible:    {}", result.reason().unwrap_or_default());
                    println!("Remaining debt:  {:>14.2}", result.remaining_debt);
                }
            }
        }
    }
    Ok(())
}
