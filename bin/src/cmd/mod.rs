//! CLI subcommand modules.
//!
//! This module contains the implementations for all jerez CLI subcommands.

pub(crate) mod backtest;
pub(crate) mod metrics;
pub(crate) mod rank;
pub(crate) mod score;

use std::path::Path;

use anyhow::{Context, Result};

use jerez_data::{TimeSeriesStore, Universe};
use jerez_traits::{JerezError, Metric};

/// Loads the feed and reports skipped lines.
pub(crate) fn load_store(data: &Path) -> Result<TimeSeriesStore> {
    let store = TimeSeriesStore::from_jsonl_path(data)
        .with_context(|| format!("loading feed {}", data.display()))?;
    println!(
        "Loaded {} tickers ({} malformed lines skipped)",
        store.len(),
        store.skipped_lines()
    );
    Ok(store)
}

/// Builds the universe from an optional symbol list.
pub(crate) fn universe_from(symbols: &[String]) -> Universe {
    if symbols.is_empty() {
        Universe::All
    } else {
        Universe::from_symbols(symbols)
    }
}

/// Resolves a metric name against the registry, failing fast on unknowns.
pub(crate) fn resolve_metric(name: &str) -> Result<Box<dyn Metric>> {
    jerez_metrics::metric_by_name(name).ok_or_else(|| {
        let known: Vec<&str> = jerez_metrics::available_metrics()
            .iter()
            .map(|info| info.name)
            .collect();
        anyhow::Error::new(JerezError::UnknownMetric(name.to_string()))
            .context(format!("available metrics: {}", known.join(", ")))
    })
}

/// Formats an optional value for table output.
pub(crate) fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_metric() {
        let metric = resolve_metric("ebit_to_ppe").unwrap();
        assert_eq!(metric.name(), "ebit_to_ppe");
    }

    #[test]
    fn test_unknown_metric_surfaces_registry_error() {
        let err = resolve_metric("sharpe_of_sharpes").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JerezError>(),
            Some(JerezError::UnknownMetric(name)) if name == "sharpe_of_sharpes"
        ));
        // The context names the metrics the user could have asked for.
        assert!(format!("{err:#}").contains("ebit_to_ppe"));
    }
}
