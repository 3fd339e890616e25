#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/jerez/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # jerez
//!
//! Cross-sectional fundamental scoring and rebalancing backtest engine.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jerez::data::{TimeSeriesStore, Universe};
//! use jerez::metrics::{MetricEvaluator, ScoreReport, metric_by_name};
//! use jerez::Result;
//!
//! # fn main() -> Result<()> {
//! // Load the fundamental feed (one JSON record per line)
//! let store = TimeSeriesStore::from_jsonl_path("fundamentals.jsonl")?;
//! let symbols = Universe::All.resolve(&store)?;
//!
//! // Score a metric across the universe at one target year
//! let metric = metric_by_name("ebit_to_ppe").expect("registered metric");
//! let evaluator = MetricEvaluator::default();
//! let snapshot = evaluator.snapshot(metric.as_ref(), &store, &symbols, 2023);
//! let report = ScoreReport::from_snapshot(metric.name(), 2023, &snapshot);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core abstractions ([`Metric`], period alignment, cache)
//! - [`data`] - JSONL ingestion and universe selection
//! - [`metrics`] - Metric implementations, registry, percentile ranking
//! - [`backtest`] - Annually rebalanced portfolio simulation
//!
//! ## Architecture
//!
//! jerez follows a leaf-first pipeline:
//!
//! 1. **TimeSeriesStore** owns every ticker's fundamental series
//! 2. **Metrics** map (record, target year) to an optional scalar
//! 3. **PercentileRanker** places each value within the cross-section
//! 4. **RebalancingSimulator** compounds portfolio NAV year over year

/// Version information for the jerez crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core trait definitions and shared types.
pub mod traits {
    pub use jerez_traits::*;
}

// Re-export core abstractions at top level for convenience
pub use jerez_traits::{AlignmentConfig, Direction, Metric, ScoreCache};

// Re-export error types
pub use jerez_traits::{JerezError, Result};

// Re-export common types
pub use jerez_traits::{Date, Symbol, TickerRecord};

// ============================================================================
// Data Ingestion
// ============================================================================

/// Fundamental time-series ingestion and universe selection.
pub mod data {
    pub use jerez_data::*;
}

// ============================================================================
// Metrics & Ranking
// ============================================================================

/// Metric implementations, registry, evaluator and percentile ranking.
///
/// Metrics are organized by category:
///
/// - **Quality**: EBIT to PP&E, gross and operating margins, return on assets
/// - **Value**: enterprise value to EBIT
/// - **Growth**: revenue growth, growth consistency
pub mod metrics {
    pub use jerez_metrics::*;
}

// ============================================================================
// Backtesting
// ============================================================================

/// Annually rebalanced portfolio simulation.
///
/// Two schemes run side by side: a metric-weighted portfolio rebalanced
/// every year from the current metric snapshot, and a revenue-weighted
/// benchmark whose weights are fixed at the start year.
pub mod backtest {
    pub use jerez_backtest::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use jerez::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backtest::{BacktestConfig, RebalancingSimulator, WeightingPolicy};
    pub use crate::data::{TimeSeriesStore, Universe};
    pub use crate::metrics::{MetricEvaluator, ScoreReport, metric_by_name, percentile_ranks};
    pub use crate::{AlignmentConfig, Direction, JerezError, Metric, Result};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_metric(_metric: &dyn Metric) {}
        fn _accept_cache(_cache: &dyn ScoreCache) {}

        let _result: Result<()> = Ok(());
        let _error: JerezError = JerezError::Config("test".to_string());
    }
}
