//! Enterprise value to EBIT valuation metric.

use jerez_traits::{AlignmentConfig, Direction, Metric, TickerRecord, fields};

use crate::lookup::aligned_value;

/// Enterprise value relative to operating income.
///
/// The classic acquirer's multiple: how many years of current operating
/// profit the whole capital structure costs. Lower is cheaper. Companies
/// with non-positive operating income have no meaningful multiple and
/// yield an unavailable result.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvToEbit;

impl Metric for EvToEbit {
    fn name(&self) -> &str {
        "ev_to_ebit"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn required_fields(&self) -> &[&str] {
        &[fields::ENTERPRISE_VALUE, fields::OPERATING_INCOME]
    }

    fn evaluate(
        &self,
        record: &TickerRecord,
        target_year: i32,
        alignment: AlignmentConfig,
    ) -> Option<f64> {
        let ev = aligned_value(record, fields::ENTERPRISE_VALUE, target_year, alignment)?;
        let ebit = aligned_value(record, fields::OPERATING_INCOME, target_year, alignment)?;
        (ebit > 0.0).then(|| ev / ebit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn record(ev: Option<f64>, ebit: Option<f64>) -> TickerRecord {
        let mut data = HashMap::new();
        data.insert(fields::ENTERPRISE_VALUE.to_string(), vec![ev]);
        data.insert(fields::OPERATING_INCOME.to_string(), vec![ebit]);
        TickerRecord::new("TEST".to_string(), vec!["2020-12-31".to_string()], data)
    }

    #[test]
    fn test_multiple() {
        let value = EvToEbit
            .evaluate(&record(Some(1200.0), Some(100.0)), 2020, AlignmentConfig::default())
            .unwrap();
        assert_relative_eq!(value, 12.0);
    }

    #[test]
    fn test_direction_is_lower_is_better() {
        assert_eq!(EvToEbit.direction(), Direction::LowerIsBetter);
    }

    #[test]
    fn test_loss_making_is_unavailable() {
        assert!(
            EvToEbit
                .evaluate(&record(Some(1200.0), Some(-5.0)), 2020, AlignmentConfig::default())
                .is_none()
        );
        assert!(
            EvToEbit
                .evaluate(&record(None, Some(100.0)), 2020, AlignmentConfig::default())
                .is_none()
        );
    }
}
