//! EBIT to net PP&E quality metric.

use jerez_traits::{AlignmentConfig, Direction, Metric, TickerRecord, fields};

use crate::lookup::aligned_value;

/// Operating income relative to net property, plant and equipment.
///
/// Measures how much operating profit a company generates per unit of
/// productive fixed assets, a capital-efficiency lens favored for
/// asset-heavy businesses. A non-positive asset base makes the ratio
/// meaningless and yields an unavailable result.
#[derive(Debug, Clone, Copy, Default)]
pub struct EbitToPpe;

impl Metric for EbitToPpe {
    fn name(&self) -> &str {
        "ebit_to_ppe"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn required_fields(&self) -> &[&str] {
        &[fields::OPERATING_INCOME, fields::PPE_NET]
    }

    fn evaluate(
        &self,
        record: &TickerRecord,
        target_year: i32,
        alignment: AlignmentConfig,
    ) -> Option<f64> {
        let ebit = aligned_value(record, fields::OPERATING_INCOME, target_year, alignment)?;
        let ppe = aligned_value(record, fields::PPE_NET, target_year, alignment)?;
        (ppe > 0.0).then(|| ebit / ppe)
    }
}
