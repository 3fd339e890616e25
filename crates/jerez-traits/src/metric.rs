//! Metric trait for scoring companies from fundamental data.
//!
//! This module defines the `Metric` trait, the core abstraction for mapping
//! a ticker's fundamental record and a target year to a scalar value.
//! Metrics can represent profitability ratios, valuation multiples, growth
//! rates, or any other quantitative measure derived from point-in-time
//! fundamentals.

use serde::{Deserialize, Serialize};

use crate::{AlignmentConfig, TickerRecord};

/// Whether larger or smaller raw values indicate a better company.
///
/// Percentile-derived weights invert for [`Direction::LowerIsBetter`]
/// metrics so that "better" always maps to a larger weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Larger values are better (e.g. margins, returns on capital).
    HigherIsBetter,
    /// Smaller values are better (e.g. valuation multiples, volatility).
    LowerIsBetter,
}

/// A pure fundamental metric.
///
/// The `Metric` trait defines the interface for computing a scalar score for
/// one ticker at one target year. Implementations must be stateless and
/// thread-safe (`Send + Sync`); the evaluator fans metric computation out
/// across worker threads.
///
/// Returning `None` means the metric is unavailable for that ticker and
/// year: a required field is missing, no fiscal period aligns with the
/// target year, or a denominator is non-positive. Unavailability is an
/// ordinary value that propagates through ranking and weighting as
/// "excluded", never an error.
///
/// # Example
///
/// ```
/// use jerez_traits::{AlignmentConfig, Direction, Metric, TickerRecord};
///
/// struct Leverage;
///
/// impl Metric for Leverage {
///     fn name(&self) -> &str {
///         "leverage"
///     }
///
///     fn direction(&self) -> Direction {
///         Direction::LowerIsBetter
///     }
///
///     fn required_fields(&self) -> &[&str] {
///         &["total_debt", "total_assets"]
///     }
///
///     fn evaluate(
///         &self,
///         record: &TickerRecord,
///         target_year: i32,
///         alignment: AlignmentConfig,
///     ) -> Option<f64> {
///         let idx = jerez_traits::find_period_index(
///             record.period_end_dates(),
///             target_year,
///             alignment,
///         )?;
///         let debt = record.value_at("total_debt", idx)?;
///         let assets = record.value_at("total_assets", idx)?;
///         (assets > 0.0).then(|| debt / assets)
///     }
/// }
/// ```
pub trait Metric: Send + Sync {
    /// Returns the unique name of this metric.
    ///
    /// Used for registry lookup, cache keys, logging and result storage.
    fn name(&self) -> &str;

    /// Returns whether larger or smaller values are better.
    fn direction(&self) -> Direction;

    /// Returns the fundamental fields this metric reads.
    ///
    /// Used for documentation and introspection; a missing field simply
    /// yields `None` at evaluation time.
    fn required_fields(&self) -> &[&str];

    /// Computes the metric for one ticker at one target year.
    ///
    /// Each required field is aligned to `target_year` independently under
    /// the given alignment policy. Returns `None` when the metric cannot be
    /// computed; implementations must not substitute zeros or defaults for
    /// missing financial data.
    fn evaluate(
        &self,
        record: &TickerRecord,
        target_year: i32,
        alignment: AlignmentConfig,
    ) -> Option<f64>;
}

impl std::fmt::Debug for dyn Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metric").field("name", &self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct ConstantMetric;

    impl Metric for ConstantMetric {
        fn name(&self) -> &str {
            "constant"
        }

        fn direction(&self) -> Direction {
            Direction::HigherIsBetter
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
            Some(1.0)
        }
    }

    #[test]
    fn test_metric_object_safety() {
        let metric: Box<dyn Metric> = Box::new(ConstantMetric);
        let record = TickerRecord::new("TEST".to_string(), Vec::new(), HashMap::new());
        assert_eq!(metric.name(), "constant");
        assert_eq!(
            metric.evaluate(&record, 2020, AlignmentConfig::default()),
            Some(1.0)
        );
    }

    #[test]
    fn test_metric_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Box<dyn Metric>>();
    }
}
