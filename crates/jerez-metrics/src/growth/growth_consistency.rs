//! Revenue growth consistency metric.

use serde::{Deserialize, Serialize};

use jerez_traits::{AlignmentConfig, Direction, Metric, TickerRecord, fields, find_period_index};

/// Configuration for the growth consistency metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrowthConsistencyConfig {
    /// Quarters of history examined, ending at the aligned period
    /// (default: 20).
    pub window_quarters: usize,

    /// Minimum number of year-over-year growth observations required
    /// before the dispersion is considered meaningful (default: 4).
    pub min_observations: usize,
}

impl Default for GrowthConsistencyConfig {
    fn default() -> Self {
        Self {
            window_quarters: 20,
            min_observations: 4,
        }
    }
}

/// Dispersion of year-over-year revenue growth.
///
/// Computes the growth rate of each quarter against the same quarter one
/// year earlier across the window, then returns the population standard
/// deviation of those rates. A steady compounder scores near zero; lumpy
/// or cyclical revenue scores high, so lower is better.
#[derive(Debug, Clone, Copy)]
pub struct GrowthConsistency {
    config: GrowthConsistencyConfig,
}

impl GrowthConsistency {
    /// Creates the metric with the given configuration.
    #[must_use]
    pub const fn new(config: GrowthConsistencyConfig) -> Self {
        Self { config }
    }
}

impl Default for GrowthConsistency {
    fn default() -> Self {
        Self::new(GrowthConsistencyConfig::default())
    }
}

impl Metric for GrowthConsistency {
    fn name(&self) -> &str {
        "growth_consistency"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
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
        let end = find_period_index(record.period_end_dates(), target_year, alignment)?;
        let revenue = record.series(fields::REVENUE)?;

        let window_start = (end + 1).saturating_sub(self.config.window_quarters);
        let mut growth_rates = Vec::new();
        for i in window_start..=end {
            if i < 4 {
                continue;
            }
            if let (Some(current), Some(prior)) = (revenue[i], revenue[i - 4])
                && prior > 0.0
            {
                growth_rates.push(current / prior - 1.0);
            }
        }

        if growth_rates.len() < self.config.min_observations {
            return None;
        }

        let n = growth_rates.len() as f64;
        let mean = growth_rates.iter().sum::<f64>() / n;
        let variance = growth_rates.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n;
        Some(variance.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn quarterly_record(revenue: Vec<Option<f64>>) -> TickerRecord {
        let n = revenue.len();
        let mut dates = Vec::with_capacity(n);
        for i in 0..n {
            let quarters_back = (n - 1 - i) as i32;
            let year = 2020 - quarters_back / 4;
            let month = 12 - 3 * (quarters_back % 4);
            dates.push(format!("{year}-{month:02}-28"));
        }
        let mut data = HashMap::new();
        data.insert(fields::REVENUE.to_string(), revenue);
        TickerRecord::new("TEST".to_string(), dates, data)
    }

    #[test]
    fn test_steady_grower_scores_zero() {
        // Every quarter is 10% above the same quarter a year before.
        let mut revenue = vec![100.0, 100.0, 100.0, 100.0];
        for i in 4..20 {
            revenue.push(revenue[i - 4] * 1.1);
        }
        let revenue: Vec<Option<f64>> = revenue.into_iter().map(Some).collect();
        let value = GrowthConsistency::default()
            .evaluate(&quarterly_record(revenue), 2020, AlignmentConfig::default())
            .unwrap();
        assert_relative_eq!(value, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lumpy_grower_scores_high() {
        let mut revenue = vec![100.0, 100.0, 100.0, 100.0];
        for i in 4..20 {
            // Alternate +50% and -20% against the prior year.
            let factor = if i % 2 == 0 { 1.5 } else { 0.8 };
            revenue.push(revenue[i - 4] * factor);
        }
        let revenue: Vec<Option<f64>> = revenue.into_iter().map(Some).collect();
        let value = GrowthConsistency::default()
            .evaluate(&quarterly_record(revenue), 2020, AlignmentConfig::default())
            .unwrap();
        assert!(value > 0.2);
    }

    #[test]
    fn test_dispersion_is_population_stddev() {
        // YoY rates are exactly [0.1, 0.2, 0.3, 0.4]: mean 0.25,
        // population variance 0.0125.
        let revenue: Vec<Option<f64>> = [100.0, 100.0, 100.0, 100.0, 110.0, 120.0, 130.0, 140.0]
            .into_iter()
            .map(Some)
            .collect();
        let value = GrowthConsistency::default()
            .evaluate(&quarterly_record(revenue), 2020, AlignmentConfig::default())
            .unwrap();
        assert_relative_eq!(value, 0.0125_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_observations_is_unavailable() {
        let revenue: Vec<Option<f64>> = vec![Some(100.0); 6];
        assert!(
            GrowthConsistency::default()
                .evaluate(&quarterly_record(revenue), 2020, AlignmentConfig::default())
                .is_none()
        );
    }
}
