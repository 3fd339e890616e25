//! Cross-sectional percentile ranking.

use std::collections::BTreeMap;

use serde::Serialize;

use jerez_traits::Symbol;

use crate::evaluator::Snapshot;

/// Assigns each ranked ticker a percentile in (0, 100].
///
/// Unavailable and non-finite values pass through as `None`; they do not
/// shrink anyone else's rank beyond leaving the ranked population smaller.
/// Tied values share the average rank of the tied group, so identical
/// inputs always receive identical percentiles. The result depends only on
/// the multiset of values, never on input iteration order.
#[must_use]
pub fn percentile_ranks(snapshot: &Snapshot) -> BTreeMap<Symbol, Option<f64>> {
    let mut ranked: Vec<f64> = snapshot
        .values()
        .filter_map(|v| v.filter(|x| x.is_finite()))
        .collect();
    ranked.sort_by(|a, b| a.partial_cmp(b).expect("finite values compare"));
    let count = ranked.len() as f64;

    snapshot
        .iter()
        .map(|(symbol, value)| {
            let percentile = value.filter(|x| x.is_finite()).map(|x| {
                let strictly_lower = ranked.partition_point(|&y| y < x);
                let tied = ranked.partition_point(|&y| y <= x) - strictly_lower;
                (strictly_lower as f64 + 0.5 * tied as f64) / count * 100.0
            });
            (symbol.clone(), percentile)
        })
        .collect()
}

/// Per-ticker scoring result for one metric and target year, the shape the
/// external reporting layer consumes.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    /// Metric name.
    pub metric: String,
    /// Target calendar year.
    pub target_year: i32,
    /// One entry per universe ticker, sorted by symbol.
    pub entries: Vec<ScoreEntry>,
}

/// One ticker's raw value and percentile.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntry {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Raw metric value, absent when unavailable.
    pub raw_value: Option<f64>,
    /// Percentile rank in (0, 100], absent when unavailable.
    pub percentile: Option<f64>,
}

impl ScoreReport {
    /// Builds a report from a snapshot, computing percentiles.
    #[must_use]
    pub fn from_snapshot(metric: &str, target_year: i32, snapshot: &Snapshot) -> Self {
        let percentiles = percentile_ranks(snapshot);
        let entries = snapshot
            .iter()
            .map(|(symbol, &raw_value)| ScoreEntry {
                symbol: symbol.clone(),
                raw_value,
                percentile: percentiles.get(symbol).copied().flatten(),
            })
            .collect();
        Self {
            metric: metric.to_string(),
            target_year,
            entries,
        }
    }

    /// Entries with a percentile, sorted best first (highest percentile).
    #[must_use]
    pub fn ranked_entries(&self) -> Vec<&ScoreEntry> {
        let mut ranked: Vec<&ScoreEntry> = self
            .entries
            .iter()
            .filter(|e| e.percentile.is_some())
            .collect();
        ranked.sort_by(|a, b| {
            b.percentile
                .partial_cmp(&a.percentile)
                .expect("finite percentiles compare")
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(pairs: &[(&str, Option<f64>)]) -> Snapshot {
        pairs
            .iter()
            .map(|(s, v)| (s.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_ties_share_average_rank() {
        let snap = snapshot(&[
            ("A", Some(10.0)),
            ("B", Some(20.0)),
            ("C", Some(20.0)),
            ("D", Some(40.0)),
        ]);
        let ranks = percentile_ranks(&snap);
        assert_relative_eq!(ranks["A"].unwrap(), 12.5);
        assert_relative_eq!(ranks["B"].unwrap(), 50.0);
        assert_relative_eq!(ranks["C"].unwrap(), 50.0);
        assert_relative_eq!(ranks["D"].unwrap(), 87.5);
    }

    #[test]
    fn test_none_passes_through() {
        let snap = snapshot(&[("A", Some(1.0)), ("B", None), ("C", Some(2.0))]);
        let ranks = percentile_ranks(&snap);
        assert!(ranks["B"].is_none());
        // Ranked population is 2, not 3.
        assert_relative_eq!(ranks["A"].unwrap(), 25.0);
        assert_relative_eq!(ranks["C"].unwrap(), 75.0);
    }

    #[test]
    fn test_non_finite_treated_as_unavailable() {
        let snap = snapshot(&[("A", Some(1.0)), ("B", Some(f64::NAN))]);
        let ranks = percentile_ranks(&snap);
        assert!(ranks["B"].is_none());
        assert_relative_eq!(ranks["A"].unwrap(), 50.0);
    }

    #[test]
    fn test_monotone_in_raw_value() {
        let snap = snapshot(&[
            ("A", Some(3.0)),
            ("B", Some(1.0)),
            ("C", Some(2.0)),
            ("D", Some(2.0)),
            ("E", Some(9.0)),
        ]);
        let ranks = percentile_ranks(&snap);
        let mut pairs: Vec<(f64, f64)> = snap
            .iter()
            .map(|(s, v)| (v.unwrap(), ranks[s].unwrap()))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        for window in pairs.windows(2) {
            assert!(window[0].1 <= window[1].1);
        }
    }

    #[test]
    fn test_order_invariance() {
        let forward = snapshot(&[("A", Some(1.0)), ("B", Some(5.0)), ("C", Some(3.0))]);
        let backward = snapshot(&[("C", Some(3.0)), ("B", Some(5.0)), ("A", Some(1.0))]);
        assert_eq!(percentile_ranks(&forward), percentile_ranks(&backward));
    }

    #[test]
    fn test_single_value_is_fifty() {
        let snap = snapshot(&[("A", Some(42.0))]);
        assert_relative_eq!(percentile_ranks(&snap)["A"].unwrap(), 50.0);
    }

    #[test]
    fn test_report_ranked_entries() {
        let snap = snapshot(&[("A", Some(10.0)), ("B", None), ("C", Some(30.0))]);
        let report = ScoreReport::from_snapshot("ebit_to_ppe", 2020, &snap);
        assert_eq!(report.entries.len(), 3);

        let ranked = report.ranked_entries();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].symbol, "C");
        assert_eq!(ranked[1].symbol, "A");
    }
}
