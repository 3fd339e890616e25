//! Fiscal period alignment.
//!
//! Fundamental series are indexed by fiscal period-end date, which rarely
//! lands exactly on a requested calendar year boundary. This module finds the
//! index of the period best matching a target year under a tolerance and
//! directionality policy. Every metric implementation calls
//! [`find_period_index`] once per required field, making it the most reused
//! building block in the engine.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::Date;

/// Policy knobs for fiscal period alignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Whether periods ending before the target year may be selected.
    /// Disabling this skips earlier periods entirely, which is the
    /// conservative choice when a metric must not look backward.
    pub allow_earlier: bool,

    /// Maximum acceptable distance, in fiscal years, between the selected
    /// period and the target year. Matches beyond this window are rejected
    /// rather than attributed to a wildly mismatched fiscal period.
    pub tolerance_years: i32,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            allow_earlier: true,
            tolerance_years: 1,
        }
    }
}

/// Leniently parse a period-end date string.
///
/// Accepts `YYYY-MM-DD`, an ISO datetime (date prefix is used), `YYYY-MM`
/// (first of month), and a bare `YYYY` (end of year). Returns `None` for
/// anything else; unparsable entries are skipped by the aligner, never fatal
/// to the whole series.
#[must_use]
pub fn parse_period_date(raw: &str) -> Option<Date> {
    let s = raw.trim();
    if let Ok(d) = Date::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    // ISO datetime ("2020-12-31T00:00:00" or "2020-12-31 00:00:00")
    if s.len() > 10
        && let Ok(d) = Date::parse_from_str(&s[..10], "%Y-%m-%d")
    {
        return Some(d);
    }
    if s.len() == 7
        && let Ok(d) = Date::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
    {
        return Some(d);
    }
    if let Ok(year) = s.parse::<i32>() {
        return Date::from_ymd_opt(year, 12, 31);
    }
    None
}

/// Finds the index of the fiscal period best matching `target_year`.
///
/// Selects the period whose calendar year is closest to the target year.
/// Ties at equal year distance are broken by preferring the latest date not
/// exceeding the target year when `allow_earlier` is set (the conservative,
/// look-ahead-avoiding choice), and otherwise by the smallest day distance
/// to the start of the target year, lower index winning exact ties.
///
/// Returns `None` when the series is empty, no date parses, or the closest
/// match falls outside the tolerance window.
///
/// The function is pure: the same inputs always produce the same index.
#[must_use]
pub fn find_period_index(
    period_dates: &[String],
    target_year: i32,
    config: AlignmentConfig,
) -> Option<usize> {
    let candidates: Vec<(usize, Date)> = period_dates
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| parse_period_date(raw).map(|d| (idx, d)))
        .filter(|(_, d)| config.allow_earlier || d.year() >= target_year)
        .collect();

    let min_distance = candidates
        .iter()
        .map(|(_, d)| (d.year() - target_year).abs())
        .min()?;
    if min_distance > config.tolerance_years {
        return None;
    }

    let at_minimum: Vec<(usize, Date)> = candidates
        .into_iter()
        .filter(|(_, d)| (d.year() - target_year).abs() == min_distance)
        .collect();

    if config.allow_earlier {
        // Prefer the latest period that does not reach past the target year.
        let not_later = at_minimum
            .iter()
            .filter(|(_, d)| d.year() <= target_year)
            .max_by_key(|(_, d)| *d);
        if let Some(&(idx, _)) = not_later {
            return Some(idx);
        }
    }

    // Closest in either direction, measured in days from the start of the
    // target year; the earlier index wins exact ties.
    let target_start = Date::from_ymd_opt(target_year, 1, 1)?;
    at_minimum
        .into_iter()
        .min_by_key(|&(idx, d)| ((d - target_start).num_days().abs(), idx))
        .map(|(idx, _)| idx)
}
