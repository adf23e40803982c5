//! Investment term conversions
//!
//! Terms entered as a count of days, months or years convert to days with a
//! 30-day month and a 365-day year, and to years with 12 months / 365 days.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days per month used for term conversions
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Days per year used for term conversions and annualization
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Unit of an investment term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermUnit {
    Day,
    Month,
    Year,
}

impl TermUnit {
    /// Length of `period` units in days
    pub fn total_days(&self, period: f64) -> f64 {
        match self {
            TermUnit::Day => period,
            TermUnit::Month => period * DAYS_PER_MONTH,
            TermUnit::Year => period * DAYS_PER_YEAR,
        }
    }

    /// Length of `period` units in years
    pub fn total_years(&self, period: f64) -> f64 {
        match self {
            TermUnit::Day => period / DAYS_PER_YEAR,
            TermUnit::Month => period / 12.0,
            TermUnit::Year => period,
        }
    }
}

/// Whole calendar days from `start` to `date` (negative if `date` is earlier)
pub fn days_between(start: NaiveDate, date: NaiveDate) -> i64 {
    (date - start).num_days()
}

/// Whole months elapsed from `start` to `end`, truncated toward zero
///
/// A month counts once `start` advanced by it (clamped to month end) does not
/// pass `end`, so 2024-01-31 to 2024-02-29 is one month.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let mut months = (month_index(end) - month_index(start)).max(0) as u32;
    while months > 0 {
        match start.checked_add_months(Months::new(months)) {
            Some(anchor) if anchor <= end => break,
            _ => months -= 1,
        }
    }
    months
}

fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}
