//! Cross-sectional metric evaluation.
//!
//! Per-ticker evaluation for a fixed target year is side-effect-free and
//! embarrassingly parallel, so snapshots fan out across the rayon thread
//! pool. Ranking and weighting wait for the whole snapshot; they depend on
//! the full cross-sectional distribution.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use jerez_data::TimeSeriesStore;
use jerez_traits::{
    AlignmentConfig, CachedScore, Metric, ScoreCache, ScoreKey, Symbol, TickerRecord,
};

/// One metric's value for every ticker in a universe at one target year.
///
/// `None` entries mark tickers for which the metric is unavailable. Keyed
/// by a sorted map so results are deterministic regardless of evaluation
/// order.
pub type Snapshot = BTreeMap<Symbol, Option<f64>>;

/// Evaluates metrics across a universe, optionally consulting a score cache.
#[derive(Clone)]
pub struct MetricEvaluator {
    alignment: AlignmentConfig,
    cache: Option<Arc<dyn ScoreCache>>,
    metric_set_version: u32,
}

impl std::fmt::Debug for MetricEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricEvaluator")
            .field("alignment", &self.alignment)
            .field("cached", &self.cache.is_some())
            .field("metric_set_version", &self.metric_set_version)
            .finish()
    }
}

impl Default for MetricEvaluator {
    fn default() -> Self {
        Self::new(AlignmentConfig::default())
    }
}

impl MetricEvaluator {
    /// Creates an evaluator with the given alignment policy and no cache.
    #[must_use]
    pub const fn new(alignment: AlignmentConfig) -> Self {
        Self {
            alignment,
            cache: None,
            metric_set_version: 1,
        }
    }

    /// Attaches an injected score cache. `metric_set_version` keys the
    /// cached entries and must change whenever metric formulas do.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ScoreCache>, metric_set_version: u32) -> Self {
        self.cache = Some(cache);
        self.metric_set_version = metric_set_version;
        self
    }

    /// The alignment policy in force.
    #[must_use]
    pub const fn alignment(&self) -> AlignmentConfig {
        self.alignment
    }

    /// Evaluates one metric for one ticker, consulting the cache if present.
    #[must_use]
    pub fn evaluate(
        &self,
        metric: &dyn Metric,
        record: &TickerRecord,
        target_year: i32,
    ) -> Option<f64> {
        let Some(cache) = &self.cache else {
            return metric.evaluate(record, target_year, self.alignment);
        };

        let key = ScoreKey {
            symbol: record.symbol().to_uppercase(),
            metric: metric.name().to_string(),
            target_year,
            metric_set_version: self.metric_set_version,
        };
        if let Some(hit) = cache.get(&key) {
            return hit.raw_value;
        }

        let raw_value = metric.evaluate(record, target_year, self.alignment);
        cache.put(
            key,
            CachedScore {
                raw_value,
                computed_at: Instant::now(),
            },
        );
        raw_value
    }

    /// Evaluates one metric for every symbol in parallel.
    ///
    /// Symbols absent from the store appear in the snapshot as unavailable,
    /// the same as a ticker whose data cannot support the metric.
    #[must_use]
    pub fn snapshot(
        &self,
        metric: &dyn Metric,
        store: &TimeSeriesStore,
        symbols: &[Symbol],
        target_year: i32,
    ) -> Snapshot {
        symbols
            .par_iter()
            .map(|symbol| {
                let value = store
                    .get(symbol)
                    .and_then(|record| self.evaluate(metric, record, target_year));
                (symbol.clone(), value)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use jerez_traits::MemoryScoreCache;
    use std::io::Cursor;
    use std::sync::Mutex;

    use crate::quality::EbitToPpe;

    fn store() -> TimeSeriesStore {
        let feed = r#"{"symbol": "AAA", "data": {"period_end_date": ["2020-12-31"], "operating_income": [100.0], "ppe_net": [50.0]}}
{"symbol": "BBB", "data": {"period_end_date": ["2020-12-31"], "operating_income": [30.0], "ppe_net": [60.0]}}
{"symbol": "CCC", "data": {"period_end_date": ["2020-12-31"], "operating_income": [30.0], "ppe_net": [null]}}
"#;
        TimeSeriesStore::from_reader(Cursor::new(feed)).unwrap()
    }

    #[test]
    fn test_snapshot() {
        let store = store();
        let evaluator = MetricEvaluator::default();
        let symbols = store.symbols();
        let snapshot = evaluator.snapshot(&EbitToPpe, &store, &symbols, 2020);

        assert_eq!(snapshot.len(), 3);
        assert_relative_eq!(snapshot["AAA"].unwrap(), 2.0);
        assert_relative_eq!(snapshot["BBB"].unwrap(), 0.5);
        assert!(snapshot["CCC"].is_none());
    }

    #[test]
    fn test_snapshot_includes_unknown_symbols_as_unavailable() {
        let store = store();
        let evaluator = MetricEvaluator::default();
        let symbols = vec!["AAA".to_string(), "ZZZZ".to_string()];
        let snapshot = evaluator.snapshot(&EbitToPpe, &store, &symbols, 2020);
        assert!(snapshot["ZZZZ"].is_none());
    }

    #[test]
    fn test_cache_hit_short_circuits_computation() {
        struct CountingMetric(Mutex<usize>);

        impl Metric for CountingMetric {
            fn name(&self) -> &str {
                "counting"
            }
            fn direction(&self) -> jerez_traits::Direction {
                jerez_traits::Direction::HigherIsBetter
            }
            fn required_fields(&self) -> &[&str] {
                &[]
            }
            fn evaluate(
                &self,
                _record: &TickerRecord,
                _target_year: i32,
                _alignment: AlignmentConfig,
            ) -> Option<f64> {
                *self.0.lock().unwrap() += 1;
                Some(7.0)
            }
        }

        let store = store();
        let metric = CountingMetric(Mutex::new(0));
        let cache = Arc::new(MemoryScoreCache::new());
        let evaluator = MetricEvaluator::default().with_cache(cache, 1);

        let record = store.get("AAA").unwrap();
        assert_eq!(evaluator.evaluate(&metric, record, 2020), Some(7.0));
        assert_eq!(evaluator.evaluate(&metric, record, 2020), Some(7.0));
        assert_eq!(*metric.0.lock().unwrap(), 1);
    }

    #[test]
    fn test_unavailable_results_are_cached_too() {
        let store = store();
        let cache = Arc::new(MemoryScoreCache::new());
        let evaluator = MetricEvaluator::default().with_cache(Arc::clone(&cache) as _, 1);

        let record = store.get("CCC").unwrap();
        assert!(evaluator.evaluate(&EbitToPpe, record, 2020).is_none());
        assert_eq!(cache.len(), 1);
    }
}
