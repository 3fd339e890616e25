//! `jerez rank` subcommand.

use std::path::Path;

use anyhow::Result;

use jerez_data::Universe;
use jerez_metrics::{MetricEvaluator, ScoreReport};

use super::{fmt_opt, load_store, resolve_metric};

pub(crate) fn run(metric_name: &str, data: &Path, year: i32, top: Option<usize>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Percentile Ranking                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let metric = resolve_metric(metric_name)?;
    let store = load_store(data)?;
    let universe = Universe::All.resolve(&store)?;

    let evaluator = MetricEvaluator::default();
    let snapshot = evaluator.snapshot(metric.as_ref(), &store, &universe, year);
    let report = ScoreReport::from_snapshot(metric_name, year, &snapshot);

    let ranked = report.ranked_entries();
    let shown = top.unwrap_or(ranked.len());

    println!("Metric: {metric_name} ({year})");
    println!(
        "Ranked {} of {} tickers\n",
        ranked.len(),
        report.entries.len()
    );

    println!("{:<6} {:<10} {:>14} {:>12}", "Rank", "Symbol", "Raw", "Percentile");
    println!("{}", "─".repeat(45));
    for (i, entry) in ranked.iter().take(shown).enumerate() {
        println!(
            "{:<6} {:<10} {:>14} {:>12}",
            i + 1,
            entry.symbol,
            fmt_opt(entry.raw_value),
            fmt_opt(entry.percentile)
        );
    }
    println!();

    Ok(())
}
