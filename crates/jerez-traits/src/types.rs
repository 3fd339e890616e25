//! Common types used throughout the Jerez engine.
//!
//! This module defines the core data types for representing per-ticker
//! fundamental time series, symbols, and temporal information.

use std::collections::HashMap;

use serde::Deserialize;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier.
///
/// Symbols are used to identify securities across the Jerez engine.
/// Typically these are ticker symbols like "AAPL" or "MSFT".
pub type Symbol = String;

/// Canonical names of the fundamental fields metrics read from.
pub mod fields {
    /// Quarterly operating income (EBIT).
    pub const OPERATING_INCOME: &str = "operating_income";
    /// Net property, plant and equipment.
    pub const PPE_NET: &str = "ppe_net";
    /// Market capitalization at period end.
    pub const MARKET_CAP: &str = "market_cap";
    /// Quarterly revenue.
    pub const REVENUE: &str = "revenue";
    /// Quarterly cost of goods sold.
    pub const COGS: &str = "cogs";
    /// Enterprise value at period end.
    pub const ENTERPRISE_VALUE: &str = "enterprise_value";
    /// Return on assets, already expressed as a ratio.
    pub const ROA: &str = "roa";
}

/// Per-ticker fundamental time series.
///
/// A `TickerRecord` holds one or more parallel series of per-period values,
/// all indexed against the same ordered list of fiscal period-end dates
/// (oldest first). `None` entries denote data unavailable for that period
/// and must never be read as zero.
///
/// A field whose series length disagrees with the period-end date list is
/// treated as unavailable in its entirety rather than as an error; bad feeds
/// degrade a metric, they do not abort a run.
#[derive(Debug, Clone)]
pub struct TickerRecord {
    symbol: Symbol,
    period_end_dates: Vec<String>,
    fields: HashMap<String, Vec<Option<f64>>>,
}

impl TickerRecord {
    /// Creates a new record from its parts.
    #[must_use]
    pub const fn new(
        symbol: Symbol,
        period_end_dates: Vec<String>,
        fields: HashMap<String, Vec<Option<f64>>>,
    ) -> Self {
        Self {
            symbol,
            period_end_dates,
            fields,
        }
    }

    /// The ticker symbol this record describes.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Raw fiscal period-end date strings, oldest first.
    #[must_use]
    pub fn period_end_dates(&self) -> &[String] {
        &self.period_end_dates
    }

    /// Number of fiscal periods in this record.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.period_end_dates.len()
    }

    /// Returns a field's full series, or `None` if the field is absent or
    /// its length disagrees with the period-end date list.
    #[must_use]
    pub fn series(&self, field: &str) -> Option<&[Option<f64>]> {
        let values = self.fields.get(field)?;
        if values.len() != self.period_end_dates.len() {
            return None;
        }
        Some(values)
    }

    /// Returns the value of `field` at period `index`, or `None` if the
    /// field is unavailable or the value at that period is missing.
    #[must_use]
    pub fn value_at(&self, field: &str, index: usize) -> Option<f64> {
        self.series(field)?.get(index).copied().flatten()
    }

    /// Names of the fields present in this record, in arbitrary order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Wire shape of one input feed line: `{"symbol": ..., "data": {...}}`.
///
/// All arrays under `data` share index alignment with `period_end_date`.
/// Converted into a [`TickerRecord`] via [`TryFrom`]; a record without a
/// `period_end_date` array is malformed.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    /// Ticker symbol.
    pub symbol: String,
    /// Field name to per-period array, dates as strings, values as
    /// numbers or nulls.
    pub data: HashMap<String, Vec<serde_json::Value>>,
}

impl TryFrom<RawRecord> for TickerRecord {
    type Error = crate::JerezError;

    fn try_from(raw: RawRecord) -> crate::Result<Self> {
        let mut data = raw.data;
        let dates = data.remove("period_end_date").ok_or_else(|| {
            crate::JerezError::MalformedRecord(format!(
                "record for {} has no period_end_date array",
                raw.symbol
            ))
        })?;

        let period_end_dates: Vec<String> = dates
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => Ok(s),
                other => Err(crate::JerezError::MalformedRecord(format!(
                    "non-string period_end_date entry for {}: {other}",
                    raw.symbol
                ))),
            })
            .collect::<crate::Result<_>>()?;

        let fields = data
            .into_iter()
            .map(|(name, values)| {
                let series = values
                    .into_iter()
                    .map(|v| v.as_f64())
                    .collect::<Vec<Option<f64>>>();
                (name, series)
            })
            .collect();

        Ok(Self::new(raw.symbol, period_end_dates, fields))
    }
}
