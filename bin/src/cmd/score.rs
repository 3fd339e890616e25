//! `jerez score` subcommand.

use std::path::Path;

use anyhow::Result;

use jerez_metrics::{MetricEvaluator, ScoreReport};

use super::{fmt_opt, load_store, resolve_metric, universe_from};

pub(crate) fn run(
    metric_name: &str,
    data: &Path,
    year: i32,
    symbols: &[String],
    format: &str,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                        Metric Scores                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let metric = resolve_metric(metric_name)?;
    let store = load_store(data)?;
    let universe = universe_from(symbols).resolve(&store)?;

    println!("Metric:   {metric_name}");
    println!("Year:     {year}");
    println!("Universe: {} tickers", universe.len());
    println!();

    let evaluator = MetricEvaluator::default();
    let snapshot = evaluator.snapshot(metric.as_ref(), &store, &universe, year);
    let report = ScoreReport::from_snapshot(metric_name, year, &snapshot);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:<10} {:>14} {:>12}", "Symbol", "Raw", "Percentile");
    println!("{}", "─".repeat(38));
    for entry in &report.entries {
        println!(
            "{:<10} {:>14} {:>12}",
            entry.symbol,
            fmt_opt(entry.raw_value),
            fmt_opt(entry.percentile)
        );
    }
    println!();

    Ok(())
}
