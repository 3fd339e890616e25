//! Jerez CLI binary.
//!
//! Provides the command-line interface for the Jerez fundamental scoring
//! and backtesting engine.

mod cmd;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jerez")]
#[command(about = "Cross-sectional fundamental scoring and backtesting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available metrics
    Metrics {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score a metric across a universe at one target year
    Score {
        /// Metric name
        metric: String,

        /// Path to the JSONL fundamental feed
        #[arg(short, long)]
        data: PathBuf,

        /// Target calendar year
        #[arg(short, long)]
        year: i32,

        /// Ticker symbols (defaults to every loaded ticker)
        #[arg(short, long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Rank a universe by percentile, best first
    Rank {
        /// Metric name
        metric: String,

        /// Path to the JSONL fundamental feed
        #[arg(short, long)]
        data: PathBuf,

        /// Target calendar year
        #[arg(short, long)]
        year: i32,

        /// Show only the top N tickers
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Run the annual rebalancing backtest
    Backtest {
        /// Metric driving the rebalanced portfolio
        metric: String,

        /// Path to the JSONL fundamental feed
        #[arg(short, long)]
        data: PathBuf,

        /// First year of the horizon
        #[arg(long)]
        start: i32,

        /// Last year of the horizon, inclusive
        #[arg(long)]
        end: i32,

        /// Weighting policy (value or rank)
        #[arg(short, long, default_value = "rank")]
        weighting: String,

        /// Ticker symbols (defaults to every loaded ticker)
        #[arg(short, long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Metrics { category, verbose } => cmd::metrics::run(category, verbose),
        Commands::Score {
            metric,
            data,
            year,
            symbols,
            format,
        } => cmd::score::run(&metric, &data, year, &symbols, &format),
        Commands::Rank {
            metric,
            data,
            year,
            top,
        } => cmd::rank::run(&metric, &data, year, top),
        Commands::Backtest {
            metric,
            data,
            start,
            end,
            weighting,
            symbols,
            format,
        } => cmd::backtest::run(&metric, &data, start, end, &weighting, &symbols, &format),
    }
}
