//! Multi-year revenue growth metric.

use serde::{Deserialize, Serialize};

use jerez_traits::{AlignmentConfig, Direction, Metric, TickerRecord, fields, find_period_index};

/// Configuration for the revenue growth metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RevenueGrowthConfig {
    /// Total quarters in the comparison window (default: 20, i.e. the last
    /// 2.5 years of revenue against the 2.5 years before them). Must be
    /// even.
    pub window_quarters: usize,
}

impl Default for RevenueGrowthConfig {
    fn default() -> Self {
        Self { window_quarters: 20 }
    }
}

/// Revenue growth over a multi-year window.
///
/// Sums the most recent half of the window and divides by the sum of the
/// older half, ending at the period aligned to the target year. Summing
/// halves instead of comparing single quarters smooths out seasonality.
/// Requires a complete window of positive revenue; a missing or
/// non-positive quarter makes the metric unavailable rather than silently
/// shrinking the window or letting a bad quarter distort the ratio.
#[derive(Debug, Clone, Copy)]
pub struct RevenueGrowth {
    config: RevenueGrowthConfig,
}

impl RevenueGrowth {
    /// Creates the metric with the given configuration.
    #[must_use]
    pub const fn new(config: RevenueGrowthConfig) -> Self {
        Self { config }
    }

    /// Total quarters in the comparison window.
    #[must_use]
    pub const fn window_quarters(&self) -> usize {
        self.config.window_quarters
    }
}

impl Default for RevenueGrowth {
    fn default() -> Self {
        Self::new(RevenueGrowthConfig::default())
    }
}

impl Metric for RevenueGrowth {
    fn name(&self) -> &str {
        "revenue_growth"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn required_fields(&self) -> &[&str] {
        &[fields::REVENUE]
    }

    fn evaluate(
        &self,
        record: &TickerRecord,
        target_year: i32,
        alignment: AlignmentConfig,
    ) -> Option<f64> {
        let window = self.config.window_quarters;
        if window == 0 || window % 2 != 0 {
            return None;
        }

        let end = find_period_index(record.period_end_dates(), target_year, alignment)?;
        let revenue = record.series(fields::REVENUE)?;
        if end + 1 < window {
            return None;
        }

        let start = end + 1 - window;
        let half = window / 2;
        let mut older = 0.0;
        let mut recent = 0.0;
        for (i, value) in revenue[start..=end].iter().copied().enumerate() {
            let v = value.filter(|&x| x > 0.0)?;
            if i < half {
                older += v;
            } else {
                recent += v;
            }
        }
        Some(recent / older)
    }
}
