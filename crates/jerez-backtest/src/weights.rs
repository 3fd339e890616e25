//! Portfolio weight derivation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jerez_metrics::{Snapshot, percentile_ranks};
use jerez_traits::{Direction, Symbol};

/// How metric values map to portfolio weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingPolicy {
    /// Weight proportional to the raw metric value. Negative values clamp
    /// to zero for higher-is-better metrics; lower-is-better metrics use
    /// the reciprocal of positive values.
    ProportionalToValue,
    /// Weight proportional to the percentile rank across the current
    /// constituent set, inverted for lower-is-better metrics.
    ProportionalToRank,
}

/// Derives normalized weights from a metric snapshot.
///
/// Only tickers with an available, finite value participate. Weights sum to
/// 1.0 over the participants; when every raw weight degenerates to zero the
/// participants fall back to equal weighting rather than an empty book.
/// Returns an empty map when no ticker participates.
#[must_use]
pub fn derive_weights(
    policy: WeightingPolicy,
    direction: Direction,
    snapshot: &Snapshot,
) -> BTreeMap<Symbol, f64> {
    let raw: BTreeMap<Symbol, f64> = match policy {
        WeightingPolicy::ProportionalToValue => snapshot
            .iter()
            .filter_map(|(symbol, value)| {
                let v = value.filter(|x| x.is_finite())?;
                let w = match direction {
                    Direction::HigherIsBetter => v.max(0.0),
                    Direction::LowerIsBetter => (v > 0.0).then(|| 1.0 / v)?,
                };
                Some((symbol.clone(), w))
            })
            .collect(),
        WeightingPolicy::ProportionalToRank => percentile_ranks(snapshot)
            .into_iter()
            .filter_map(|(symbol, percentile)| {
                let p = percentile?;
                let w = match direction {
                    Direction::HigherIsBetter => p,
                    Direction::LowerIsBetter => 100.0 - p,
                };
                Some((symbol, w))
            })
            .collect(),
    };

    normalize(raw)
}

/// Normalizes raw weights to sum to 1.0, equal-weighting when the total
/// degenerates to zero.
pub(crate) fn normalize(raw: BTreeMap<Symbol, f64>) -> BTreeMap<Symbol, f64> {
    if raw.is_empty() {
        return raw;
    }
    let total: f64 = raw.values().sum();
    if total > 0.0 {
        raw.into_iter().map(|(s, w)| (s, w / total)).collect()
    } else {
        let equal = 1.0 / raw.len() as f64;
        raw.into_keys().map(|s| (s, equal)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(pairs: &[(&str, Option<f64>)]) -> Snapshot {
        pairs.iter().map(|(s, v)| (s.to_string(), *v)).collect()
    }

    fn total(weights: &BTreeMap<Symbol, f64>) -> f64 {
        weights.values().sum()
    }

    #[test]
    fn test_value_weights_proportional() {
        let snap = snapshot(&[("A", Some(1.0)), ("B", Some(3.0))]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToValue,
            Direction::HigherIsBetter,
            &snap,
        );
        assert_relative_eq!(w["A"], 0.25);
        assert_relative_eq!(w["B"], 0.75);
        assert_relative_eq!(total(&w), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_values_clamp_to_zero() {
        let snap = snapshot(&[("A", Some(-5.0)), ("B", Some(1.0))]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToValue,
            Direction::HigherIsBetter,
            &snap,
        );
        assert_relative_eq!(w["A"], 0.0);
        assert_relative_eq!(w["B"], 1.0);
    }

    #[test]
    fn test_all_zero_falls_back_to_equal() {
        let snap = snapshot(&[("A", Some(-1.0)), ("B", Some(-2.0))]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToValue,
            Direction::HigherIsBetter,
            &snap,
        );
        assert_relative_eq!(w["A"], 0.5);
        assert_relative_eq!(w["B"], 0.5);
    }

    #[test]
    fn test_lower_is_better_value_uses_reciprocal() {
        // A at a multiple of 5 is twice as attractive as B at 10.
        let snap = snapshot(&[("A", Some(5.0)), ("B", Some(10.0))]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToValue,
            Direction::LowerIsBetter,
            &snap,
        );
        assert!(w["A"] > w["B"]);
        assert_relative_eq!(w["A"], 2.0 * w["B"], epsilon = 1e-12);
    }

    #[test]
    fn test_rank_weights_favor_better_percentile() {
        let snap = snapshot(&[("A", Some(10.0)), ("B", Some(20.0)), ("C", Some(40.0))]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToRank,
            Direction::HigherIsBetter,
            &snap,
        );
        assert!(w["C"] > w["B"]);
        assert!(w["B"] > w["A"]);
        assert_relative_eq!(total(&w), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rank_weights_invert_for_lower_is_better() {
        let snap = snapshot(&[("A", Some(10.0)), ("B", Some(20.0)), ("C", Some(40.0))]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToRank,
            Direction::LowerIsBetter,
            &snap,
        );
        assert!(w["A"] > w["B"]);
        assert!(w["B"] > w["C"]);
    }

    #[test]
    fn test_unavailable_tickers_excluded() {
        let snap = snapshot(&[("A", Some(1.0)), ("B", None)]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToRank,
            Direction::HigherIsBetter,
            &snap,
        );
        assert!(!w.contains_key("B"));
        assert_relative_eq!(total(&w), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_snapshot_gives_empty_weights() {
        let snap = snapshot(&[("A", None)]);
        let w = derive_weights(
            WeightingPolicy::ProportionalToValue,
            Direction::HigherIsBetter,
            &snap,
        );
        assert!(w.is_empty());
    }
}
