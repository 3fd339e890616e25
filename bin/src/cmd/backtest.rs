//! `jerez backtest` subcommand.

use std::path::Path;

use anyhow::{Result, bail};

use jerez_backtest::{
    BacktestConfig, METRIC_WEIGHTED, REVENUE_WEIGHTED, RebalancingSimulator, WeightingPolicy,
};
use jerez_traits::AlignmentConfig;

use super::{load_store, resolve_metric, universe_from};

pub(crate) fn run(
    metric_name: &str,
    data: &Path,
    start: i32,
    end: i32,
    weighting: &str,
    symbols: &[String],
    format: &str,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Rebalancing Backtest                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let weighting = parse_weighting(weighting)?;
    let metric = resolve_metric(metric_name)?;
    let store = load_store(data)?;
    let universe = universe_from(symbols);

    println!("Metric:    {metric_name}");
    println!("Horizon:   {start} to {end}");
    println!("Weighting: {weighting:?}");
    println!();

    let config = BacktestConfig {
        start_year: start,
        end_year: end,
        weighting,
        alignment: AlignmentConfig::default(),
    };
    let simulator = RebalancingSimulator::new(config)?;
    let report = simulator.run(metric.as_ref(), &store, &universe)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:<8} {:>16} {:>18} {:>8} {:>9}",
        "Year", "Metric NAV", "Benchmark NAV", "Held", "Dropped"
    );
    println!("{}", "─".repeat(62));

    let metric_nav = &report.navs[METRIC_WEIGHTED];
    let revenue_nav = &report.navs[REVENUE_WEIGHTED];
    for (i, &(year, nav)) in metric_nav.iter().enumerate() {
        let benchmark = revenue_nav.get(i).map_or(f64::NAN, |&(_, n)| n);
        let (held, dropped) = report
            .membership
            .get(i)
            .map_or((0, 0), |m| (m.held.len(), m.dropped.len()));
        println!("{year:<8} {nav:>16.4} {benchmark:>18.4} {held:>8} {dropped:>9}");
    }
    println!();

    for (label, scheme) in [
        ("Metric-weighted", METRIC_WEIGHTED),
        ("Revenue-weighted", REVENUE_WEIGHTED),
    ] {
        if let Some(cagr) = report.annualized_return(scheme) {
            println!("{label:<18} annualized return: {:.2}%", cagr * 100.0);
        }
    }
    println!();

    Ok(())
}

fn parse_weighting(name: &str) -> Result<WeightingPolicy> {
    match name.to_lowercase().as_str() {
        "value" | "proportional_to_value" => Ok(WeightingPolicy::ProportionalToValue),
        "rank" | "proportional_to_rank" => Ok(WeightingPolicy::ProportionalToRank),
        other => bail!("unknown weighting '{other}'; expected 'value' or 'rank'"),
    }
}
