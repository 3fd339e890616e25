//! Shared aligned field lookups.
//!
//! Every metric reads fields through [`aligned_value`], which aligns the
//! field to the target year independently before fetching it. Market cap and
//! revenue lookups additionally reject non-positive values, which guard
//! against bad feed data that would otherwise corrupt weights and returns.

use jerez_traits::{AlignmentConfig, TickerRecord, fields, find_period_index};

/// Aligns `field` to `target_year` and returns its value at the aligned
/// period, or `None` on an alignment miss or missing value.
#[must_use]
pub fn aligned_value(
    record: &TickerRecord,
    field: &str,
    target_year: i32,
    alignment: AlignmentConfig,
) -> Option<f64> {
    let idx = find_period_index(record.period_end_dates(), target_year, alignment)?;
    record.value_at(field, idx)
}

/// Market capitalization aligned to `target_year`, positive values only.
#[must_use]
pub fn market_cap_at(
    record: &TickerRecord,
    target_year: i32,
    alignment: AlignmentConfig,
) -> Option<f64> {
    aligned_value(record, fields::MARKET_CAP, target_year, alignment).filter(|&mc| mc > 0.0)
}

/// Revenue aligned to `target_year`, positive values only.
#[must_use]
pub fn revenue_at(
    record: &TickerRecord,
    target_year: i32,
    alignment: AlignmentConfig,
) -> Option<f64> {
    aligned_value(record, fields::REVENUE, target_year, alignment).filter(|&rev| rev > 0.0)
}
