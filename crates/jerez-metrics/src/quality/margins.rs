//! Profit margin quality metrics.

use jerez_traits::{AlignmentConfig, Direction, Metric, TickerRecord, fields};

use crate::lookup::aligned_value;

/// Gross margin: (revenue - cost of goods sold) / revenue.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrossMargin;

impl Metric for GrossMargin {
    fn name(&self) -> &str {
        "gross_margin"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn required_fields(&self) -> &[&str] {
        &[fields::REVENUE, fields::COGS]
    }

    fn evaluate(
        &self,
        record: &TickerRecord,
        target_year: i32,
        alignment: AlignmentConfig,
    ) -> Option<f64> {
        let revenue = aligned_value(record, fields::REVENUE, target_year, alignment)?;
        let cogs = aligned_value(record, fields::COGS, target_year, alignment)?;
        (revenue > 0.0).then(|| (revenue - cogs) / revenue)
    }
}

/// Operating margin: operating income / revenue.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatingMargin;

impl Metric for OperatingMargin {
    fn name(&self) -> &str {
        "operating_margin"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn required_fields(&self) -> &[&str] {
        &[fields::OPERATING_INCOME, fields::REVENUE]
    }

    fn evaluate(
        &self,
        record: &TickerRecord,
        target_year: i32,
        alignment: AlignmentConfig,
    ) -> Option<f64> {
        let ebit = aligned_value(record, fields::OPERATING_INCOME, target_year, alignment)?;
        let revenue = aligned_value(record, fields::REVENUE, target_year, alignment)?;
        (revenue > 0.0).then(|| ebit / revenue)
    }
}
