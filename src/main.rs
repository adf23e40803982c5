//! Annual Yield CLI
//!
//! Command-line front end for the yield engine
//!
//! ```bash
//! # Lump sum with one top-up
//! annual-yield lump-sum --initial 10000 --start 2023-01-01 --final 13500 --end 2024-01-01 \
//!     --top-up 2023-06-30:2000
//!
//! # Dated monthly plan solved as XIRR
//! annual-yield plan --initial 10000 --periodic 1000 --frequency month \
//!     --start 2023-01-01 --end 2024-01-01 --final 24000
//!
//! # Periodic-compounding SIP yield
//! annual-yield sip --initial 10000 --periodic 1000 --months 12 --final 24000
//! ```
//!
//! Solver settings can be overridden with `YIELD_INITIAL_GUESS`,
//! `YIELD_TOLERANCE` and `YIELD_MAX_ITERATIONS`.

use annual_yield::batch::{parse_top_up, BatchRunner};
use annual_yield::format::{format_amount, format_percent};
use annual_yield::history::{HistoryStore, DEFAULT_HISTORY_PATH};
use annual_yield::schedule::{build_lump_sum_schedule, whole_months_between, Frequency, TopUp};
use annual_yield::solver::{bucketed_irr_with_config, sip::SipParams, SolverConfig};
use annual_yield::yields::{LumpSumRequest, PeriodicPlanRequest, YieldEngine, YieldReport, YieldRequest};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Annualized return calculator for lump sums and periodic plans
#[derive(Parser)]
#[command(name = "annual-yield")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// History file used by --save and the history command
    #[arg(long, global = true, env = "YIELD_HISTORY_PATH", default_value = DEFAULT_HISTORY_PATH)]
    history: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lump-sum investment with optional top-ups (CAGR or XIRR)
    LumpSum(LumpSumArgs),

    /// Dated periodic plan solved as XIRR over its contribution schedule
    Plan(PlanArgs),

    /// Periodic plan solved with periodic compounding
    Sip(SipArgs),

    /// Evaluate every request in a CSV file
    Batch(BatchArgs),

    /// Show or edit saved calculations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Table,
    /// JSON
    Json,
}

#[derive(Args)]
struct LumpSumArgs {
    /// Initial investment
    #[arg(long)]
    initial: f64,

    /// Date of the initial investment (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Value at the end date
    #[arg(long = "final")]
    final_amount: f64,

    /// Valuation date (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Additional investment as DATE:AMOUNT (repeatable)
    #[arg(long = "top-up", value_parser = parse_top_up_arg)]
    top_ups: Vec<TopUp>,

    /// Also report the 30-day bucketed IRR
    #[arg(long)]
    compare: bool,

    /// Save the calculation to history
    #[arg(long)]
    save: bool,
}

#[derive(Args)]
struct PlanArgs {
    /// Initial investment
    #[arg(long, default_value = "0")]
    initial: f64,

    /// Monthly-equivalent contribution
    #[arg(long)]
    periodic: f64,

    /// Contribution frequency
    #[arg(long, default_value = "month")]
    frequency: Frequency,

    /// First day of the plan (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Valuation date (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Current market value
    #[arg(long = "final")]
    final_amount: f64,

    /// Save the calculation to history
    #[arg(long)]
    save: bool,
}

#[derive(Args)]
struct SipArgs {
    /// Initial investment
    #[arg(long, default_value = "0")]
    initial: f64,

    /// Monthly-equivalent contribution
    #[arg(long)]
    periodic: f64,

    /// Plan length in months
    #[arg(long, conflicts_with_all = ["start", "end"], required_unless_present = "start")]
    months: Option<i64>,

    /// Plan start (YYYY-MM-DD); with --end, derives --months
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Plan end (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// Contribution frequency
    #[arg(long, default_value = "month")]
    frequency: Frequency,

    /// Current market value
    #[arg(long = "final")]
    final_amount: f64,

    /// Save the calculation to history
    #[arg(long)]
    save: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// CSV file of requests
    path: PathBuf,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved calculations, newest first
    List,
    /// Delete one saved calculation
    Delete { id: u64 },
    /// Delete every saved calculation
    Clear,
}

/// JSON shape of a single calculation
#[derive(Serialize)]
struct CalculationOutput<'a> {
    request: &'a YieldRequest,
    report: &'a YieldReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucketed_irr: Option<f64>,
}

fn parse_top_up_arg(s: &str) -> Result<TopUp, String> {
    parse_top_up(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let engine = YieldEngine::new(SolverConfig::from_env());

    match cli.command {
        Commands::LumpSum(args) => {
            let request = LumpSumRequest {
                initial_amount: args.initial,
                start_date: args.start,
                top_ups: args.top_ups,
                final_amount: args.final_amount,
                end_date: args.end,
            };
            let bucketed = if args.compare {
                build_lump_sum_schedule(
                    request.initial_amount,
                    request.start_date,
                    &request.top_ups,
                    request.final_amount,
                    request.end_date,
                )
                .ok()
                .and_then(|schedule| bucketed_irr_with_config(&schedule, engine.config()))
            } else {
                None
            };
            let request = YieldRequest::LumpSum(request);
            let report = engine.evaluate(&request);
            print_calculation(&request, &report, bucketed, cli.format)?;
            if args.save {
                save(&cli.history, request, report)?;
            }
        }
        Commands::Plan(args) => {
            let request = YieldRequest::PeriodicPlan(PeriodicPlanRequest {
                initial_amount: args.initial,
                periodic_amount: args.periodic,
                frequency: args.frequency,
                start_date: args.start,
                end_date: args.end,
                final_amount: args.final_amount,
            });
            let report = engine.evaluate(&request);
            print_calculation(&request, &report, None, cli.format)?;
            if args.save {
                save(&cli.history, request, report)?;
            }
        }
        Commands::Sip(args) => {
            let months = match (args.months, args.start, args.end) {
                (Some(months), _, _) => months,
                (None, Some(start), Some(end)) => whole_months_between(start, end) as i64,
                _ => anyhow::bail!("either --months or --start/--end is required"),
            };
            let request = YieldRequest::Sip(SipParams {
                initial_amount: args.initial,
                periodic_amount: args.periodic,
                months,
                frequency: args.frequency,
                final_amount: args.final_amount,
            });
            let report = engine.evaluate(&request);
            print_calculation(&request, &report, None, cli.format)?;
            if args.save {
                save(&cli.history, request, report)?;
            }
        }
        Commands::Batch(args) => {
            let runner = BatchRunner::with_config(*engine.config());
            let results = runner
                .run_csv(&args.path)
                .with_context(|| format!("Failed to evaluate {}", args.path.display()))?;
            print_batch(&results, cli.format)?;
        }
        Commands::History { action } => {
            let mut store = HistoryStore::open(&cli.history)
                .with_context(|| format!("Failed to open history {}", cli.history.display()))?;
            match action {
                HistoryAction::List => print_history(&store, cli.format)?,
                HistoryAction::Delete { id } => {
                    if store.delete(id)? {
                        println!("Deleted record {}", id);
                    } else {
                        println!("No record {}", id);
                    }
                }
                HistoryAction::Clear => {
                    store.clear()?;
                    println!("History cleared");
                }
            }
        }
    }

    Ok(())
}

fn save(path: &Path, request: YieldRequest, report: YieldReport) -> Result<()> {
    let mut store =
        HistoryStore::open(path).with_context(|| format!("Failed to open history {}", path.display()))?;
    let id = store.append(request, report)?.id;
    println!("\nSaved to {} (record {})", path.display(), id);
    Ok(())
}

fn print_calculation(
    request: &YieldRequest,
    report: &YieldReport,
    bucketed: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        let output = CalculationOutput {
            request,
            report,
            bucketed_irr: bucketed,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Annualized Yield ({})", request.kind());
    println!("======================\n");
    println!("  Annual Rate:     {}", format_percent(report.rate(), 2));
    println!("  Method:          {}", report.result.method);
    println!("  Converged:       {} ({} iterations)", report.converged(), report.result.iterations);
    println!("  Total Invested:  {}", format_amount(report.total_invested));
    println!("  Total Return:    {}", format_amount(report.total_return));
    println!("  Final Value:     {}", format_amount(report.final_value));
    if let Some(days) = report.days {
        println!("  Days:            {}", days);
    }
    if let Some(rate) = bucketed {
        println!("  Bucketed IRR:    {} (30-day buckets)", format_percent(rate, 2));
    }
    if !report.converged() {
        println!("\n  Solver did not converge; the rate is a best estimate");
    }
    Ok(())
}

fn print_batch(results: &[(YieldRequest, YieldReport)], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let rows: Vec<_> = results
            .iter()
            .map(|(request, report)| CalculationOutput {
                request,
                report,
                bucketed_irr: None,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:>4} {:<14} {:>10} {:<13} {:>5} {:>16} {:>16}",
        "Row", "Kind", "Rate", "Method", "Conv", "Invested", "Return");
    println!("{}", "-".repeat(84));
    for (i, (request, report)) in results.iter().enumerate() {
        println!("{:>4} {:<14} {:>10} {:<13} {:>5} {:>16} {:>16}",
            i + 1,
            request.kind(),
            format_percent(report.rate(), 2),
            report.result.method.to_string(),
            if report.converged() { "yes" } else { "no" },
            format_amount(report.total_invested),
            format_amount(report.total_return),
        );
    }
    Ok(())
}

fn print_history(store: &HistoryStore, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(store.records())?);
        return Ok(());
    }

    if store.records().is_empty() {
        println!("No saved calculations in {}", store.path().display());
        return Ok(());
    }

    for record in store.records() {
        println!("[{}] {}  {:<14} {:>10}  invested {}  return {}",
            record.id,
            record.saved_at.format("%Y-%m-%d %H:%M:%S"),
            record.request.kind(),
            format_percent(record.report.rate(), 2),
            format_amount(record.report.total_invested),
            format_amount(record.report.total_return),
        );
    }
    Ok(())
}
