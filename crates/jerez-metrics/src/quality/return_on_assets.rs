//! Return on assets quality metric.

use jerez_traits::{AlignmentConfig, Direction, Metric, TickerRecord, fields};

use crate::lookup::aligned_value;

/// Return on assets, read directly from the feed's precomputed ratio series.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnOnAssets;

impl Metric for ReturnOnAssets {
    fn name(&self) -> &str {
        "return_on_assets"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn required_fields(&self) -> &[&str] {
        &[fields::ROA]
    }

    fn evaluate(
        &self,
        record: &TickerRecord,
        target_year: i32,
        alignment: AlignmentConfig,
    ) -> Option<f64> {
        aligned_value(record, fields::ROA, target_year, alignment)
    }
}
