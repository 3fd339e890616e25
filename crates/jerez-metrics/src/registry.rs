//! Metric registry for discovering and instantiating available metrics.
//!
//! Adding a metric means adding a variant here and an implementation under
//! its category module; dispatch logic never changes.

use serde::{Deserialize, Serialize};

use jerez_traits::{Direction, Metric};

use crate::growth::{GrowthConsistency, RevenueGrowth};
use crate::quality::{EbitToPpe, GrossMargin, OperatingMargin, ReturnOnAssets};
use crate::value::EvToEbit;

/// Metric category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricCategory {
    /// Profitability and capital-efficiency metrics
    Quality,
    /// Valuation metrics
    Value,
    /// Revenue growth metrics
    Growth,
}

impl MetricCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Quality => "Profitability and capital-efficiency metrics",
            Self::Value => "Valuation metrics comparing fundamentals to price",
            Self::Growth => "Revenue growth level and consistency metrics",
        }
    }
}

/// Metadata about a metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricInfo {
    /// Unique identifier for the metric
    pub name: &'static str,

    /// Category classification
    pub category: MetricCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Whether larger or smaller values are better
    pub direction: Direction,

    /// Quarters of fundamental history the metric needs
    pub requires_history_quarters: usize,
}

/// Get information about all available metrics.
#[must_use]
pub fn available_metrics() -> Vec<MetricInfo> {
    vec![
        // Quality metrics
        MetricInfo {
            name: "ebit_to_ppe",
            category: MetricCategory::Quality,
            description: "Operating income relative to net PP&E",
            direction: Direction::HigherIsBetter,
            requires_history_quarters: 1,
        },
        MetricInfo {
            name: "gross_margin",
            category: MetricCategory::Quality,
            description: "Revenue less cost of goods sold, relative to revenue",
            direction: Direction::HigherIsBetter,
            requires_history_quarters: 1,
        },
        MetricInfo {
            name: "operating_margin",
            category: MetricCategory::Quality,
            description: "Operating income relative to revenue",
            direction: Direction::HigherIsBetter,
            requires_history_quarters: 1,
        },
        MetricInfo {
            name: "return_on_assets",
            category: MetricCategory::Quality,
            description: "Net income relative to total assets",
            direction: Direction::HigherIsBetter,
            requires_history_quarters: 1,
        },
        // Value metrics
        MetricInfo {
            name: "ev_to_ebit",
            category: MetricCategory::Value,
            description: "Enterprise value relative to operating income",
            direction: Direction::LowerIsBetter,
            requires_history_quarters: 1,
        },
        // Growth metrics
        MetricInfo {
            name: "revenue_growth",
            category: MetricCategory::Growth,
            description: "Recent ten quarters of revenue over the prior ten",
            direction: Direction::HigherIsBetter,
            requires_history_quarters: 20,
        },
        MetricInfo {
            name: "growth_consistency",
            category: MetricCategory::Growth,
            description: "Dispersion of year-over-year revenue growth",
            direction: Direction::LowerIsBetter,
            requires_history_quarters: 20,
        },
    ]
}

/// Get all metrics in a specific category.
#[must_use]
pub fn metrics_by_category(category: &MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific metric by name.
#[must_use]
pub fn metric_info(name: &str) -> Option<MetricInfo> {
    available_metrics()
        .into_iter()
        .find(|info| info.name == name)
}

/// Instantiate a metric by name with its default configuration.
///
/// Returns `None` for unknown names; callers turn that into a
/// configuration error before any computation starts.
#[must_use]
pub fn metric_by_name(name: &str) -> Option<Box<dyn Metric>> {
    match name {
        "ebit_to_ppe" => Some(Box::new(EbitToPpe)),
        "gross_margin" => Some(Box::new(GrossMargin)),
        "operating_margin" => Some(Box::new(OperatingMargin)),
        "return_on_assets" => Some(Box::new(ReturnOnAssets)),
        "ev_to_ebit" => Some(Box::new(EvToEbit)),
        "revenue_growth" => Some(Box::new(RevenueGrowth::default())),
        "growth_consistency" => Some(Box::new(GrowthConsistency::default())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_metrics() {
        let metrics = available_metrics();
        assert!(!metrics.is_empty());

        let categories: Vec<_> = metrics.iter().map(|m| m.category).collect();
        assert!(categories.contains(&MetricCategory::Quality));
        assert!(categories.contains(&MetricCategory::Value));
        assert!(categories.contains(&MetricCategory::Growth));
    }

    #[test]
    fn test_metrics_by_category() {
        let quality = metrics_by_category(&MetricCategory::Quality);
        assert_eq!(quality.len(), 4);

        let growth = metrics_by_category(&MetricCategory::Growth);
        assert_eq!(growth.len(), 2);
    }

    #[test]
    fn test_metric_info() {
        let info = metric_info("ebit_to_ppe").unwrap();
        assert_eq!(info.category, MetricCategory::Quality);
        assert_eq!(info.direction, Direction::HigherIsBetter);

        assert!(metric_info("nonexistent_metric").is_none());
    }

    #[test]
    fn test_every_registered_metric_instantiates() {
        for info in available_metrics() {
            let metric = metric_by_name(info.name)
                .unwrap_or_else(|| panic!("no factory for {}", info.name));
            assert_eq!(metric.name(), info.name);
            assert_eq!(metric.direction(), info.direction);
        }
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert!(metric_by_name("sharpe_of_sharpes").is_none());
    }

    #[test]
    fn test_category_descriptions() {
        assert!(!MetricCategory::Quality.description().is_empty());
        assert!(!MetricCategory::Value.description().is_empty());
        assert!(!MetricCategory::Growth.description().is_empty());
    }
}
