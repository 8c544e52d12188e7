use analytics::{compute_returns, AnalyticsEngine, ImpactParams, START_DATE_COLUMN};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{Config, OutputFormat};
use core_types::{Table, TimeSeries};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// The main entry point for the changepoint impact tool.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    // `RUST_LOG` wins over the configured level. Logs go to stderr so that JSON
    // output on stdout stays machine readable.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Returns(args) => handle_returns(args, &config),
        Commands::Report(args) => handle_report(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Describe how a price series changed around a changepoint, and what happened nearby.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the forward-filled price series with its log returns.
    Returns(ReturnsArgs),
    /// Summarize the changepoint impact and list nearby events.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReturnsArgs {
    /// JSON file holding a time series with a `Price` column.
    #[arg(long)]
    prices: PathBuf,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Parser)]
struct ReportArgs {
    /// JSON file holding a time series with a `Price` column.
    #[arg(long)]
    prices: PathBuf,

    /// Row position of the changepoint in the returns series.
    #[arg(long)]
    tau: usize,

    /// JSON file holding an event table with a `start_date` column.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Day window for the before/after slices (overrides `impact.window_days`).
    #[arg(long)]
    window_days: Option<u32>,

    /// Number of closest events to list (overrides `events.nearest_k`).
    #[arg(long)]
    nearest_k: Option<usize>,

    /// Day window for surrounding events (overrides `events.window_days`).
    #[arg(long)]
    event_window_days: Option<u32>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_returns(args: ReturnsArgs, config: &Config) -> Result<()> {
    let prices: TimeSeries = read_json(&args.prices)?;
    let returns = compute_returns(&prices)?;
    tracing::info!(rows = returns.len(), "Computed returns");

    match args.format.unwrap_or(config.report.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&returns)?),
        OutputFormat::Table => println!(
            "{}",
            render::data_table(Some(returns.index()), returns.table(), config.report.precision)
        ),
    }
    Ok(())
}

fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let prices: TimeSeries = read_json(&args.prices)?;
    let events = args
        .events
        .as_deref()
        .map(|path| -> Result<Table> {
            let raw: Table = read_json(path)?;
            Ok(raw.parse_timestamps(START_DATE_COLUMN)?)
        })
        .transpose()?;

    let params = ImpactParams {
        impact_window_days: args.window_days.or(config.impact.window_days),
        nearest_k: args.nearest_k.unwrap_or(config.events.nearest_k),
        event_window_days: args.event_window_days.unwrap_or(config.events.window_days),
    };
    tracing::info!(tau = args.tau, ?params, "Analysing changepoint");

    let report = AnalyticsEngine::new(params).analyze(&prices, args.tau, events.as_ref())?;

    if args.format.unwrap_or(config.report.format) == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let precision = config.report.precision;
    println!("{}", render::summary_table(&report.summary, precision));
    if let Some(tau) = report.tau_timestamp {
        if let Some(nearest) = &report.nearest_events {
            println!("\nNearest {} events to {tau}:", params.nearest_k);
            println!("{}", render::data_table(None, nearest, precision));
        }
        if let Some(in_window) = &report.events_in_window {
            println!(
                "\nEvents within {} days of {tau}:",
                params.event_window_days
            );
            println!("{}", render::data_table(None, in_window, precision));
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
