//! Build day-offset cash flow schedules from dated plan descriptions

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::cashflows::{CashFlowEvent, CashFlowSchedule};
use super::frequency::Frequency;
use super::term::days_between;
use crate::error::{YieldError, YieldResult};

/// An ad-hoc contribution on top of the initial investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopUp {
    /// Amount invested; `None` or non-positive amounts are ignored
    #[serde(default)]
    pub amount: Option<f64>,
    pub date: NaiveDate,
}

impl TopUp {
    pub fn new(amount: f64, date: NaiveDate) -> Self {
        Self {
            amount: Some(amount),
            date,
        }
    }

    /// Positive amount actually invested, if any
    pub fn effective_amount(&self) -> Option<f64> {
        self.amount.filter(|&a| a > 0.0)
    }
}

/// Elapsed whole days between start and end, rejecting non-positive durations
fn total_days(start: NaiveDate, end: NaiveDate) -> YieldResult<u32> {
    let days = days_between(start, end);
    if days <= 0 {
        return Err(YieldError::InvalidSchedule { start, end });
    }
    u32::try_from(days).map_err(|_| YieldError::invalid_input("investment term too long"))
}

fn day_offset(start: NaiveDate, date: NaiveDate) -> YieldResult<u32> {
    let days = days_between(start, date);
    if days < 0 {
        return Err(YieldError::TopUpBeforeStart { date, start });
    }
    u32::try_from(days).map_err(|_| YieldError::invalid_input("cash flow date too far out"))
}

/// Schedule for a lump sum with optional top-ups
///
/// Event 0 is the initial investment, each positive top-up follows at its own
/// offset, and the final amount closes the schedule at the end date. Top-ups
/// must fall within `[start_date, end_date]`.
pub fn build_lump_sum_schedule(
    initial_amount: f64,
    start_date: NaiveDate,
    top_ups: &[TopUp],
    final_amount: f64,
    end_date: NaiveDate,
) -> YieldResult<CashFlowSchedule> {
    let days = total_days(start_date, end_date)?;

    let mut events = Vec::with_capacity(top_ups.len() + 2);
    events.push(CashFlowEvent::new(-initial_amount, 0));

    for top_up in top_ups {
        if let Some(amount) = top_up.effective_amount() {
            if top_up.date > end_date {
                return Err(YieldError::TopUpAfterEnd {
                    date: top_up.date,
                    end: end_date,
                });
            }
            events.push(CashFlowEvent::new(-amount, day_offset(start_date, top_up.date)?));
        }
    }

    events.push(CashFlowEvent::new(final_amount, days));

    log::debug!(
        "Built lump-sum schedule: {} events over {} days",
        events.len(),
        days
    );
    Ok(CashFlowSchedule::from_sorted(events))
}

/// Schedule for a periodic plan
///
/// `periodic_amount` is a monthly-equivalent figure; it is rescaled to the
/// chosen frequency. Contributions start one interval after `start_date` and
/// continue while the contribution date is on or before `end_date`.
pub fn build_periodic_schedule(
    initial_amount: f64,
    periodic_amount: f64,
    frequency: Frequency,
    start_date: NaiveDate,
    end_date: NaiveDate,
    final_amount: f64,
) -> YieldResult<CashFlowSchedule> {
    let days = total_days(start_date, end_date)?;
    let interval = Days::new(frequency.interval_days() as u64);
    let contribution = frequency.normalize_monthly_amount(periodic_amount);

    let mut events = vec![CashFlowEvent::new(-initial_amount, 0)];

    let mut current = start_date.checked_add_days(interval);
    while let Some(date) = current.filter(|d| *d <= end_date) {
        events.push(CashFlowEvent::new(-contribution, day_offset(start_date, date)?));
        current = date.checked_add_days(interval);
    }

    events.push(CashFlowEvent::new(final_amount, days));

    log::debug!(
        "Built {} plan schedule: {} contributions of {:.2} over {} days",
        frequency,
        events.len() - 2,
        contribution,
        days
    );
    Ok(CashFlowSchedule::from_sorted(events))
}
